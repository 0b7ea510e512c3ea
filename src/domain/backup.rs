//! Backup frequency gate and snapshot naming

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Timestamp format embedded in backup names
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Prefix of whole-journal snapshot directories
pub const FULL_BACKUP_PREFIX: &str = "backup_";

/// How often automatic backups are taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupFrequency::Daily => "daily",
            BackupFrequency::Weekly => "weekly",
            BackupFrequency::Monthly => "monthly",
        }
    }

    /// Whether `later` falls in a later period than `earlier`
    fn later_period(&self, earlier: NaiveDate, later: NaiveDate) -> bool {
        match self {
            BackupFrequency::Daily => later > earlier,
            BackupFrequency::Weekly => {
                let (a, b) = (earlier.iso_week(), later.iso_week());
                (b.year(), b.week()) > (a.year(), a.week())
            }
            BackupFrequency::Monthly => {
                (later.year(), later.month()) > (earlier.year(), earlier.month())
            }
        }
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(BackupFrequency::Daily),
            "weekly" => Ok(BackupFrequency::Weekly),
            "monthly" => Ok(BackupFrequency::Monthly),
            _ => Err(format!(
                "Invalid backup frequency: '{}'. Valid values are: daily, weekly, monthly",
                s
            )),
        }
    }
}

/// Matches `YYYYMMDD` with an optional `_HHMMSS`
fn timestamp_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\d{8})(?:_(\d{6}))?").unwrap())
}

/// Timestamp embedded in a backup identifier, if any
pub fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    timestamp_regex().captures_iter(name).find_map(|caps| {
        let date = NaiveDate::parse_from_str(&caps[1], "%Y%m%d").ok()?;
        let time = match caps.get(2) {
            Some(t) => NaiveTime::parse_from_str(t.as_str(), "%H%M%S").ok()?,
            None => NaiveTime::MIN,
        };
        Some(date.and_time(time))
    })
}

/// Whether a new backup is due given the names of existing backups.
///
/// No parseable backup means one is due. Otherwise `now` must fall in a
/// strictly later day, ISO week or month than the newest backup.
pub fn should_backup<S: AsRef<str>>(
    existing: &[S],
    frequency: BackupFrequency,
    now: NaiveDateTime,
) -> bool {
    let latest = existing
        .iter()
        .filter_map(|name| parse_backup_timestamp(name.as_ref()))
        .max();

    match latest {
        None => true,
        Some(last) => frequency.later_period(last.date(), now.date()),
    }
}

/// Name of a single-file snapshot
pub fn file_backup_name(filename: &str, now: NaiveDateTime) -> String {
    format!("{}_{}", now.format(BACKUP_TIMESTAMP_FORMAT), filename)
}

/// Name of a whole-journal snapshot directory
pub fn full_backup_name(now: NaiveDateTime) -> String {
    format!("{}{}", FULL_BACKUP_PREFIX, now.format(BACKUP_TIMESTAMP_FORMAT))
}
