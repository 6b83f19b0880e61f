use crate::catalog::Catalog;
use crate::error::SubmissionError;
use crate::family::FamilySizeBand;
use crate::names::{SectionNames, FAMILY_SIZE_FIELD};
use chrono::NaiveDateTime;
use serde::Serialize;

/// `YYYY-MM-DDTHH:MM:SS.ffffff`, local time without an offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A posted order: family size plus selected items per section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub family_size: FamilySizeBand,

    /// `(section name, items)` in the order the sections were first posted
    pub selections: Vec<(String, Vec<String>)>,
}

impl Submission {
    /// Decode form fields
    ///
    /// Keys may repeat; every value is kept in posting order. Fields other
    /// than `family_size` must be section identifiers from `names`.
    ///
    /// # Arguments
    /// * `pairs` - Decoded `application/x-www-form-urlencoded` fields
    /// * `names` - Table mapping field identifiers back to section names
    ///
    /// # Returns
    /// * `Result<Submission, SubmissionError>` - The order, or the first
    ///   problem the client has to fix
    ///
    /// # Examples
    /// ```
    /// use pantry::family::FamilySizeBand;
    /// use pantry::names::SectionNames;
    /// use pantry::packing::Submission;
    ///
    /// let names = SectionNames::bundled().unwrap();
    /// let fields = vec![
    ///     ("beans".to_string(), "Black Beans".to_string()),
    ///     ("family_size".to_string(), "2-4: Blue".to_string()),
    ///     ("beans".to_string(), "Pinto Beans".to_string()),
    /// ];
    ///
    /// let submission = Submission::from_pairs(fields, &names).unwrap();
    /// assert_eq!(submission.family_size, FamilySizeBand::Small);
    /// assert_eq!(
    ///     submission.selections,
    ///     vec![(
    ///         "Beans & Lentils".to_string(),
    ///         vec!["Black Beans".to_string(), "Pinto Beans".to_string()]
    ///     )]
    /// );
    /// ```
    pub fn from_pairs<I>(pairs: I, names: &SectionNames) -> Result<Self, SubmissionError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut family_size = None;
        let mut selections: Vec<(String, Vec<String>)> = Vec::new();

        for (key, value) in pairs {
            if key == FAMILY_SIZE_FIELD {
                family_size = Some(value);
                continue;
            }

            let section = names
                .section_for(&key)
                .ok_or(SubmissionError::UnknownSection(key))?;

            match selections.iter_mut().find(|(s, _)| s == section) {
                Some((_, items)) => items.push(value),
                None => selections.push((section.to_string(), vec![value])),
            }
        }

        let family_size = family_size
            .ok_or(SubmissionError::MissingFamilySize)?
            .parse::<FamilySizeBand>()?;

        Ok(Self {
            family_size,
            selections,
        })
    }
}

/// Join selected items for display on the printed list
pub fn simplify(items: &[String]) -> String {
    items.join(", ")
}

/// One section line on a packing list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedSection {
    pub section: String,
    pub items: Vec<String>,
    pub display: String,
}

/// The document printed for one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingList {
    pub family_size: String,
    pub color: String,
    pub timestamp: String,
    pub sections: Vec<PackedSection>,
}

impl PackingList {
    /// Assemble the printable list for a submission
    ///
    /// Sections are laid out in catalog order so packers walk the shelves
    /// the same way every time; sections with nothing selected are dropped.
    ///
    /// # Arguments
    /// * `submission` - The decoded order
    /// * `catalog` - Catalog giving the section order
    /// * `generated_at` - Local time stamped on the list
    ///
    /// # Examples
    /// ```
    /// use pantry::catalog::Catalog;
    /// use pantry::names::SectionNames;
    /// use pantry::packing::{PackingList, Submission};
    ///
    /// let names = SectionNames::bundled().unwrap();
    /// let fields = vec![
    ///     ("family_size".to_string(), "1: Yellow".to_string()),
    ///     ("beans".to_string(), "Black Beans".to_string()),
    /// ];
    /// let submission = Submission::from_pairs(fields, &names).unwrap();
    /// let now = chrono::Local::now().naive_local();
    ///
    /// let list = PackingList::new(submission, &Catalog::bundled().unwrap(), now);
    /// assert_eq!(list.sections.len(), 1);
    /// assert!(list.section("Beans & Lentils").is_some());
    /// ```
    pub fn new(submission: Submission, catalog: &Catalog, generated_at: NaiveDateTime) -> Self {
        let mut selections = submission.selections;
        selections.retain(|(_, items)| !items.is_empty());
        selections.sort_by_key(|(section, _)| catalog.position(section).unwrap_or(usize::MAX));

        let sections = selections
            .into_iter()
            .map(|(section, items)| PackedSection {
                display: simplify(&items),
                section,
                items,
            })
            .collect();

        Self {
            family_size: submission.family_size.label().to_string(),
            color: submission.family_size.color().to_string(),
            timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            sections,
        }
    }

    pub fn section(&self, name: &str) -> Option<&PackedSection> {
        self.sections.iter().find(|s| s.section == name)
    }
}
