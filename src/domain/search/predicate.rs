//! Search predicates over journal entries

use crate::domain::day::DayNaming;
use crate::domain::entries::JournalEntry;
use crate::error::{DaybookError, Result};
use chrono::NaiveDate;
use regex::Regex;

/// A filter over entries. Construct through the checked constructors so
/// invalid ranges and patterns are rejected up front.
#[derive(Debug, Clone)]
pub enum SearchPredicate {
    /// Text contained in the flattened `title tags body`
    Substring { text: String, case_sensitive: bool },

    /// Entry carries at least one of these tags (case-insensitive)
    TagSet(Vec<String>),

    /// Day date within `start..=end`
    DateRange { start: NaiveDate, end: NaiveDate },

    /// Body word count within `min..=max`
    LengthRange { min: usize, max: Option<usize> },

    /// Regex over the flattened entry text
    Regex(Regex),

    /// Every inner predicate matches
    All(Vec<SearchPredicate>),
}

impl SearchPredicate {
    pub fn substring(text: &str, case_sensitive: bool) -> Self {
        SearchPredicate::Substring {
            text: text.to_string(),
            case_sensitive,
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SearchPredicate::TagSet(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Inclusive date range; `start > end` is an error
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DaybookError::InvalidDate(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }
        Ok(SearchPredicate::DateRange { start, end })
    }

    /// Inclusive word-count range; `max` of None means unbounded
    pub fn length_range(min: usize, max: Option<usize>) -> Result<Self> {
        if let Some(max) = max {
            if min > max {
                return Err(DaybookError::InvalidPattern(format!(
                    "Minimum word count {} exceeds maximum {}",
                    min, max
                )));
            }
        }
        Ok(SearchPredicate::LengthRange { min, max })
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(SearchPredicate::Regex)
            .map_err(|e| DaybookError::InvalidPattern(format!("'{}': {}", pattern, e)))
    }

    /// Whether `entry` passes this predicate
    pub fn matches(&self, entry: &JournalEntry, naming: &DayNaming) -> bool {
        match self {
            SearchPredicate::Substring {
                text,
                case_sensitive,
            } => {
                if text.is_empty() {
                    return true;
                }
                let haystack = entry.flattened();
                if *case_sensitive {
                    haystack.contains(text.as_str())
                } else {
                    haystack.to_lowercase().contains(&text.to_lowercase())
                }
            }
            SearchPredicate::TagSet(tags) => tags.iter().any(|t| entry.has_tag(t)),
            SearchPredicate::DateRange { start, end } => naming
                .date_from_filename(&entry.day)
                .is_some_and(|date| *start <= date && date <= *end),
            SearchPredicate::LengthRange { min, max } => {
                let words = entry.word_count();
                words >= *min && max.map_or(true, |max| words <= max)
            }
            SearchPredicate::Regex(re) => re.is_match(&entry.flattened()),
            SearchPredicate::All(predicates) => predicates.iter().all(|p| p.matches(entry, naming)),
        }
    }
}
