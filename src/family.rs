use crate::error::SubmissionError;
use std::fmt;
use std::str::FromStr;

/// Family size category printed as a colored banner on each packing list
///
/// The label strings are what the order form posts in its `family_size`
/// field, so they must stay byte-for-byte identical to the form controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySizeBand {
    /// A single person
    Single,
    /// Two to four people
    Small,
    /// Five or more people
    Large,
}

impl FamilySizeBand {
    /// All bands in the order they appear on the form
    pub const ALL: [FamilySizeBand; 3] = [
        FamilySizeBand::Single,
        FamilySizeBand::Small,
        FamilySizeBand::Large,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FamilySizeBand::Single => "1: Yellow",
            FamilySizeBand::Small => "2-4: Blue",
            FamilySizeBand::Large => "5+: Pink",
        }
    }

    /// Banner color as a CSS hex string
    pub fn color(self) -> &'static str {
        match self {
            FamilySizeBand::Single => "#ffff00",
            FamilySizeBand::Small => "#6464ff",
            FamilySizeBand::Large => "#ff69b4",
        }
    }
}

impl fmt::Display for FamilySizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FamilySizeBand {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FamilySizeBand::ALL
            .into_iter()
            .find(|band| band.label() == s)
            .ok_or_else(|| SubmissionError::UnknownFamilySize(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_colors_match_table() {
        let expected = [
            ("1: Yellow", "#ffff00"),
            ("2-4: Blue", "#6464ff"),
            ("5+: Pink", "#ff69b4"),
        ];
        for (label, color) in expected {
            let band: FamilySizeBand = label.parse().unwrap();
            assert_eq!(band.color(), color);
            assert_eq!(band.to_string(), label);
        }
    }

    #[test]
    fn unknown_band_is_rejected() {
        assert_eq!(
            "unknown".parse::<FamilySizeBand>(),
            Err(SubmissionError::UnknownFamilySize("unknown".into()))
        );
        // Labels are matched exactly
        assert!("1: yellow".parse::<FamilySizeBand>().is_err());
        assert!(" 1: Yellow".parse::<FamilySizeBand>().is_err());
    }
}
