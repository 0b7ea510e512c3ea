//! Day file naming: date <-> filename through a strftime pattern

use crate::error::{DaybookError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Extension shared by every day file
pub const DAY_EXTENSION: &str = ".md";

/// Default strftime pattern for day filenames
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Maps calendar dates to day filenames and back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayNaming {
    date_format: String,
}

impl DayNaming {
    /// Create a naming scheme, rejecting patterns that cannot produce a filename
    pub fn new(date_format: &str) -> Result<Self> {
        if date_format.trim().is_empty() {
            return Err(DaybookError::Config(
                "Invalid date format: pattern is empty".to_string(),
            ));
        }

        if date_format.contains('/') || date_format.contains('\\') {
            return Err(DaybookError::Config(format!(
                "Invalid date format: '{}' would produce a path separator",
                date_format
            )));
        }

        if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            return Err(DaybookError::Config(format!(
                "Invalid date format: '{}'",
                date_format
            )));
        }

        Ok(DayNaming {
            date_format: date_format.to_string(),
        })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Filename of the day file for `date`
    pub fn filename_for_date(&self, date: NaiveDate) -> String {
        format!("{}{}", date.format(&self.date_format), DAY_EXTENSION)
    }

    /// Parse a filename back into the date it represents.
    /// Returns None if the filename doesn't match the pattern.
    pub fn date_from_filename(&self, filename: &str) -> Option<NaiveDate> {
        let stem = filename.strip_suffix(DAY_EXTENSION)?;
        NaiveDate::parse_from_str(stem, &self.date_format).ok()
    }

    /// Whether `filename` looks like a day file at all
    pub fn is_day_file(filename: &str) -> bool {
        filename.ends_with(DAY_EXTENSION) && !filename.starts_with('.')
    }
}

impl Default for DayNaming {
    fn default() -> Self {
        DayNaming {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// A day file found in the journal directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFile {
    pub filename: String,
    /// Date parsed back from the filename, when it matches the pattern
    pub date: Option<NaiveDate>,
}

impl DayFile {
    pub fn new(filename: String, date: Option<NaiveDate>) -> Self {
        DayFile { filename, date }
    }

    pub fn label(&self) -> &str {
        day_label(&self.filename)
    }
}

/// Display label of a day file (its name without the extension)
pub fn day_label(filename: &str) -> &str {
    filename.strip_suffix(DAY_EXTENSION).unwrap_or(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_filename() {
        let naming = DayNaming::default();
        assert_eq!(naming.filename_for_date(date(2025, 1, 17)), "2025-01-17.md");
    }

    #[test]
    fn test_custom_pattern_roundtrip() {
        let naming = DayNaming::new("%d-%m-%Y").unwrap();
        let filename = naming.filename_for_date(date(2025, 1, 17));
        assert_eq!(filename, "17-01-2025.md");
        assert_eq!(naming.date_from_filename(&filename), Some(date(2025, 1, 17)));
    }

    #[test]
    fn test_date_from_filename_rejects_other_names() {
        let naming = DayNaming::default();
        assert!(naming.date_from_filename("notes.md").is_none());
        assert!(naming.date_from_filename("2025-01-17.txt").is_none());
        assert!(naming.date_from_filename("2025-13-01.md").is_none());
        assert!(naming.date_from_filename("2025-01-17").is_none());
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        assert!(DayNaming::new("").is_err());
        assert!(DayNaming::new("%Y/%m/%d").is_err());
        assert!(DayNaming::new("%Y-%m-%Q").is_err());
    }

    #[test]
    fn test_is_day_file() {
        assert!(DayNaming::is_day_file("2025-01-17.md"));
        assert!(!DayNaming::is_day_file(".2025-01-17.md"));
        assert!(!DayNaming::is_day_file("2025-01-17.md.daybook-tmp-1"));
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label("2025-01-17.md"), "2025-01-17");
        assert_eq!(day_label("README"), "README");
    }
}
