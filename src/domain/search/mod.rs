//! Search and ordering over entries from many days
//!
//! # Examples
//!
//! ```
//! use daybook::domain::day::DayNaming;
//! use daybook::domain::entries::parse_entries;
//! use daybook::domain::search::{search, SearchPredicate};
//!
//! let entries = parse_entries("# Standup\ntags: work\n\nshipped it", "2025-01-17.md");
//! let naming = DayNaming::default();
//!
//! let hits = search(&entries, &SearchPredicate::tags(["work"]), &naming);
//! assert_eq!(hits.len(), 1);
//! assert!(search(&entries, &SearchPredicate::substring("nothing", false), &naming).is_empty());
//! ```

pub mod predicate;

pub use predicate::SearchPredicate;

use crate::domain::day::DayNaming;
use crate::domain::entries::JournalEntry;
use std::cmp::Ordering;

/// Entries passing `predicate`, in input order
pub fn search(
    entries: &[JournalEntry],
    predicate: &SearchPredicate,
    naming: &DayNaming,
) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|e| predicate.matches(e, naming))
        .cloned()
        .collect()
}

/// Most recent day first, later entries of a day first.
/// Days whose filename doesn't parse come after dated ones.
pub fn sort_recent_first(entries: &mut [JournalEntry], naming: &DayNaming) {
    entries.sort_by(|a, b| {
        let day_order = match (
            naming.date_from_filename(&a.day),
            naming.date_from_filename(&b.day),
        ) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.day.cmp(&a.day),
        };

        day_order
            .then_with(|| b.day.cmp(&a.day))
            .then_with(|| b.entry_index.cmp(&a.entry_index))
    });
}

/// Which parts of an entry contain `text` (case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchLocations {
    pub title: bool,
    pub tags: bool,
    pub body: bool,
}

impl MatchLocations {
    pub fn any(&self) -> bool {
        self.title || self.tags || self.body
    }

    /// Names of the matching parts, for listings
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.title {
            labels.push("title");
        }
        if self.tags {
            labels.push("tags");
        }
        if self.body {
            labels.push("body");
        }
        labels
    }
}

pub fn match_locations(entry: &JournalEntry, text: &str) -> MatchLocations {
    if text.is_empty() {
        return MatchLocations::default();
    }

    let needle = text.to_lowercase();
    MatchLocations {
        title: entry.title.to_lowercase().contains(&needle),
        tags: entry.tags.iter().any(|t| t.to_lowercase().contains(&needle)),
        body: entry.body.to_lowercase().contains(&needle),
    }
}
