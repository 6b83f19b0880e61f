use crate::catalog::Catalog;
use crate::error::NameError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_SECTIONS: &str = include_str!("./static/sections.json");

/// Form field carrying the family size band; no section may use it
pub const FAMILY_SIZE_FIELD: &str = "family_size";

lazy_static! {
    static ref SHORT_NAME: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

#[derive(Debug, Deserialize)]
struct SectionRecord {
    section: String,
    short: String,
}

/// Lookup table between section names and their form field identifiers
///
/// Section names are free text ("Beans & Lentils") while identifiers are
/// used as HTML field names and ids ("beans"), so they are kept in a
/// separate table that has to match the catalog spreadsheet.
#[derive(Debug, Clone)]
pub struct SectionNames {
    by_section: HashMap<String, String>,
    by_short: HashMap<String, String>,
}

impl SectionNames {
    /// Build a table from `(section, short name)` pairs
    ///
    /// The table must be one-to-one: each section and each short name may
    /// appear once. Short names must be URL safe and may not collide with
    /// the `family_size` field.
    ///
    /// # Arguments
    /// * `pairs` - `(section, short name)` rows in any order
    ///
    /// # Returns
    /// * `Result<SectionNames, NameError>` - The table, or the first invalid row
    ///
    /// # Examples
    /// ```
    /// use pantry::names::SectionNames;
    ///
    /// let names = SectionNames::new([("Fresh Food", "fresh-food")]).unwrap();
    /// assert_eq!(names.section_for("fresh-food"), Some("Fresh Food"));
    /// assert!(SectionNames::new([("Rice", "rice"), ("Rice", "rice-2")]).is_err());
    /// ```
    pub fn new<I, S, T>(pairs: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut by_section = HashMap::new();
        let mut by_short: HashMap<String, String> = HashMap::new();

        for (section, short) in pairs {
            let (section, short) = (section.into(), short.into());

            if !SHORT_NAME.is_match(&short) {
                return Err(NameError::InvalidShortName { section, short });
            }
            if short == FAMILY_SIZE_FIELD {
                return Err(NameError::Reserved(short));
            }
            if by_section.contains_key(&section) {
                return Err(NameError::DuplicateSection(section));
            }
            if let Some(first) = by_short.get(&short) {
                return Err(NameError::DuplicateShortName {
                    first: first.clone(),
                    second: section,
                    short,
                });
            }

            by_short.insert(short.clone(), section.clone());
            by_section.insert(section, short);
        }

        Ok(Self {
            by_section,
            by_short,
        })
    }

    /// The table compiled into the binary
    pub fn bundled() -> Result<Self, NameError> {
        Self::from_json(DEFAULT_SECTIONS)
    }

    /// Parse a JSON array of `{"section": .., "short": ..}` records
    pub fn from_json(json: &str) -> Result<Self, NameError> {
        let records: Vec<SectionRecord> = serde_json::from_str(json)?;
        Self::new(records.into_iter().map(|r| (r.section, r.short)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Short identifier for a section
    ///
    /// A section missing from the table is a content error in the catalog,
    /// so this never falls back to a generated name.
    ///
    /// # Arguments
    /// * `section` - Section name exactly as it appears in the catalog header
    ///
    /// # Returns
    /// * `Result<&str, NameError>` - The form field identifier, or
    ///   `NameError::Unmapped` when the table has no row for `section`
    ///
    /// # Examples
    /// ```
    /// use pantry::names::SectionNames;
    ///
    /// let names = SectionNames::bundled().unwrap();
    /// assert_eq!(names.short_name("Beans & Lentils").unwrap(), "beans");
    /// assert!(names.short_name("Pet Food").is_err());
    /// ```
    pub fn short_name(&self, section: &str) -> Result<&str, NameError> {
        self.by_section
            .get(section)
            .map(String::as_str)
            .ok_or_else(|| NameError::Unmapped(section.to_string()))
    }

    /// Section name for a posted field identifier
    pub fn section_for(&self, short: &str) -> Option<&str> {
        self.by_short.get(short).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_section.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_section.is_empty()
    }

    /// Check that every catalog section has an identifier
    pub fn validate(&self, catalog: &Catalog) -> Result<(), NameError> {
        let missing: Vec<String> = catalog
            .sections()
            .filter(|s| !self.by_section.contains_key(*s))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(NameError::UnmappedSections(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    #[test]
    fn bundled_table_covers_bundled_catalog() {
        let names = SectionNames::bundled().unwrap();
        let catalog = Catalog::bundled().unwrap();
        names.validate(&catalog).unwrap();

        for section in catalog.sections() {
            let short = names.short_name(section).unwrap();
            assert!(!short.is_empty());
            assert_eq!(names.short_name(section).unwrap(), short);
            assert_eq!(names.section_for(short), Some(section));
        }
        assert_eq!(names.short_name("Fresh Food").unwrap(), "fresh-food");
        assert_eq!(names.short_name("Snack Bags for Kids").unwrap(), "snack_bags");
    }

    #[test]
    fn unmapped_section_is_an_error() {
        let names = SectionNames::bundled().unwrap();
        assert!(matches!(
            names.short_name("Pet Food"),
            Err(NameError::Unmapped(s)) if s == "Pet Food"
        ));
        assert_eq!(names.section_for("pet-food"), None);
    }

    #[test]
    fn validate_reports_every_missing_section() {
        let names = SectionNames::new([("Rice", "rice")]).unwrap();
        let catalog = Catalog::new(vec![
            CatalogEntry { section: "Rice".into(), items: vec![] },
            CatalogEntry { section: "Pet Food".into(), items: vec![] },
            CatalogEntry { section: "Candles".into(), items: vec![] },
        ]);

        match names.validate(&catalog) {
            Err(NameError::UnmappedSections(missing)) => {
                assert_eq!(missing, vec!["Pet Food", "Candles"])
            }
            other => panic!("expected unmapped sections, got {:?}", other),
        }
    }

    #[test]
    fn table_rejects_bad_identifiers() {
        assert!(matches!(
            SectionNames::new([("Rice", "rice pilaf")]),
            Err(NameError::InvalidShortName { .. })
        ));
        assert!(matches!(
            SectionNames::new([("Rice", "")]),
            Err(NameError::InvalidShortName { .. })
        ));
        assert!(matches!(
            SectionNames::new([("Rice", "rice"), ("Brown Rice", "rice")]),
            Err(NameError::DuplicateShortName { .. })
        ));
        assert!(matches!(
            SectionNames::new([("Rice", "rice"), ("Rice", "rice-2")]),
            Err(NameError::DuplicateSection(s)) if s == "Rice"
        ));
        assert!(matches!(
            SectionNames::new([("Rice", "rice"), ("Rice", "rice")]),
            Err(NameError::DuplicateSection(_))
        ));
        assert!(matches!(
            SectionNames::new([("Size", FAMILY_SIZE_FIELD)]),
            Err(NameError::Reserved(_))
        ));
        assert!(matches!(
            SectionNames::from_json("{\"Rice\": \"rice\"}"),
            Err(NameError::Parse(_))
        ));
    }
}
