use crate::error::CatalogError;
use crate::workbook;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name the catalog is stored under on the volunteer's desktop
pub const CATALOG_FILE_NAME: &str = "DriveThruGroceryList.xlsx";

const DEFAULT_CATALOG: &str = include_str!("./static/default_catalog.json");

/// One column of the grocery spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Section header, e.g. "Fresh Food"
    pub section: String,

    /// Item names in spreadsheet order
    pub items: Vec<String>,
}

/// The grocery catalog the order form is built from
///
/// Sections keep the column order of the spreadsheet. A catalog is loaded
/// once at startup and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.section.as_str())
    }

    pub fn get(&self, section: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.section == section)
    }

    /// Position of a section, used to keep packing lists in catalog order
    pub fn position(&self, section: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.section == section)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog shipped with the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(DEFAULT_CATALOG)?;
        Ok(Self::new(entries))
    }

    /// Build a catalog from spreadsheet columns
    ///
    /// The first cell of each column is the section name, the remaining
    /// non-blank cells are its items. Columns with a blank header are skipped.
    fn from_columns(path: &Path, columns: Vec<Vec<String>>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for column in columns {
            let mut cells = column.into_iter().map(|c| c.trim().to_string());
            let section = match cells.next() {
                Some(header) if !header.is_empty() => header,
                _ => continue,
            };

            if !seen.insert(section.clone()) {
                return Err(CatalogError::DuplicateSection {
                    path: path.to_path_buf(),
                    section,
                });
            }

            let items = cells.filter(|c| !c.is_empty()).collect();
            entries.push(CatalogEntry { section, items });
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::new(entries))
    }
}

/// Default catalog location: `~/Desktop/DriveThruGroceryList.xlsx`
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .map(|desktop| desktop.join(CATALOG_FILE_NAME))
}

/// Seed the catalog file from the bundled default if it does not exist yet
///
/// An existing file is never touched, so volunteers can edit the
/// spreadsheet between runs. Missing parent directories are created.
///
/// # Arguments
/// * `path` - Where the catalog workbook should live
/// * `default` - Catalog written when `path` does not exist
///
/// # Returns
/// * `Result<bool, CatalogError>` - `true` when a new workbook was written,
///   `false` when one was already there
///
/// # Examples
/// ```no_run
/// use pantry::catalog::{ensure_catalog, Catalog};
/// use std::path::Path;
///
/// let path = Path::new("DriveThruGroceryList.xlsx");
/// let seeded = ensure_catalog(path, &Catalog::bundled()?)?;
/// if seeded {
///     println!("wrote a fresh catalog to {}", path.display());
/// }
/// # Ok::<(), pantry::CatalogError>(())
/// ```
pub fn ensure_catalog(path: &Path, default: &Catalog) -> Result<bool, CatalogError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let bytes = workbook::to_xlsx(default)?;
    fs::write(path, bytes).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("seeded catalog at {}", path.display());
    Ok(true)
}

/// Load a catalog, picking the reader from the file extension
///
/// # Arguments
/// * `path` - A workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`) or a `.csv` export
///
/// # Returns
/// * `Result<Catalog, CatalogError>` - Sections in column order, or an error
///   for unreadable files, unknown extensions, empty sheets and repeated
///   section headers
///
/// # Examples
/// ```no_run
/// use pantry::catalog::load_catalog;
///
/// let catalog = load_catalog("DriveThruGroceryList.xlsx")?;
/// for entry in catalog.entries() {
///     println!("{}: {} items", entry.section, entry.items.len());
/// }
/// # Ok::<(), pantry::CatalogError>(())
/// ```
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let catalog = match extension.as_deref() {
        Some("csv") => from_csv(path),
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => from_excel(path),
        Some(ext) => Err(CatalogError::UnsupportedFormat(format!(
            "unsupported file extension: {}",
            ext
        ))),
        None => Err(CatalogError::UnsupportedFormat(
            "file has no extension".to_string(),
        )),
    }?;

    log::info!(
        "loaded {} catalog sections from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Read the first worksheet of a workbook
fn from_excel(path: &Path) -> Result<Catalog, CatalogError> {
    use calamine::{open_workbook_auto, Reader};

    let workbook_err = |source| CatalogError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    if !path.exists() {
        return Err(CatalogError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_err)?;

    let mut columns = vec![Vec::new(); range.width()];
    for row in range.rows() {
        for (c, cell) in row.iter().enumerate() {
            columns[c].push(cell_text(cell));
        }
    }

    Catalog::from_columns(path, columns)
}

fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Whole numbers come back as floats; keep "12" rather than "12.0"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Read a CSV export of the catalog with the same column layout
fn from_csv(path: &Path) -> Result<Catalog, CatalogError> {
    let csv_err = |source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut columns: Vec<Vec<String>> = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        for (c, field) in record.iter().enumerate() {
            if c >= columns.len() {
                // A column first seen below the header row has no section name
                columns.resize_with(c + 1, || vec![String::new(); r]);
            }
            columns[c].push(field.to_string());
        }
    }

    Catalog::from_columns(path, columns)
}
