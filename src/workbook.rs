use crate::catalog::Catalog;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Convert a catalog to XLSX format
///
/// Each section becomes a column: the bold header cell holds the section
/// name and the cells below it hold the items, top to bottom. This is the
/// layout [`crate::catalog::load_catalog`] reads back.
///
/// # Arguments
/// * `catalog` - Catalog to write
///
/// # Returns
/// * `Result<Vec<u8>, XlsxError>` - XLSX file content as bytes or an error
///
/// # Examples
/// ```
/// use pantry::catalog::Catalog;
/// use pantry::workbook::to_xlsx;
///
/// let catalog = Catalog::bundled().unwrap();
/// let bytes = to_xlsx(&catalog).unwrap();
/// assert!(!bytes.is_empty());
/// ```
pub fn to_xlsx(catalog: &Catalog) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (c, entry) in catalog.entries().iter().enumerate() {
        let col = c as u16;
        worksheet.write_string_with_format(0, col, &entry.section, &header)?;
        for (r, item) in entry.items.iter().enumerate() {
            worksheet.write_string((r + 1) as u32, col, item)?;
        }
        let width = entry
            .items
            .iter()
            .map(|i| i.len())
            .chain(std::iter::once(entry.section.len()))
            .max()
            .unwrap_or(10);
        worksheet.set_column_width(col, width as f64 + 2.0)?;
    }

    workbook.save_to_buffer()
}
