//! Date arguments: `today`, `yesterday` or an explicit date

use crate::domain::day::DayNaming;
use crate::error::{DaybookError, Result};
use chrono::{Duration, NaiveDate};

/// A date as typed by the user, resolved against a base day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRef {
    Today,
    Yesterday,
    Specific(NaiveDate),
}

impl DateRef {
    /// Parse `today`, `yesterday`, `YYYY-MM-DD`, or a date in the journal's
    /// own filename pattern
    pub fn parse(input: &str, naming: &DayNaming) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DateRef::Today),
            "yesterday" => Ok(DateRef::Yesterday),
            _ => NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(input.trim(), naming.date_format()))
                .map(DateRef::Specific)
                .map_err(|_| DaybookError::InvalidDate(input.to_string())),
        }
    }

    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateRef::Today => today,
            DateRef::Yesterday => today - Duration::days(1),
            DateRef::Specific(date) => *date,
        }
    }
}
