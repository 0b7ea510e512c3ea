//! Journal statistics

use crate::domain::day::{DayFile, DayNaming};
use crate::domain::entries::JournalEntry;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// Days counted as recent activity
pub const RECENT_DAYS: i64 = 7;

/// Number of tags reported in `top_tags`
pub const TOP_TAG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JournalStats {
    pub total_days: usize,
    pub total_entries: usize,
    pub total_words: usize,
    pub average_words_per_entry: usize,
    /// Entries from the last week, today included
    pub recent_entries: usize,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    /// Most used tags, by count then name
    pub top_tags: Vec<(String, usize)>,
}

impl JournalStats {
    pub fn compute(
        days: &[DayFile],
        entries: &[JournalEntry],
        naming: &DayNaming,
        today: NaiveDate,
    ) -> Self {
        let total_words: usize = entries.iter().map(JournalEntry::word_count).sum();
        let week_ago = today - Duration::days(RECENT_DAYS);

        let recent_entries = entries
            .iter()
            .filter_map(|e| naming.date_from_filename(&e.day))
            .filter(|date| *date >= week_ago)
            .count();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for tag in entries.iter().flat_map(|e| e.tags.iter()) {
            *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
        }
        let mut top_tags: Vec<(String, usize)> = counts.into_iter().collect();
        top_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_tags.truncate(TOP_TAG_LIMIT);

        let dates = days.iter().filter_map(|d| d.date);

        JournalStats {
            total_days: days.len(),
            total_entries: entries.len(),
            total_words,
            average_words_per_entry: total_words / entries.len().max(1),
            recent_entries,
            first_day: dates.clone().min(),
            last_day: dates.max(),
            top_tags,
        }
    }
}
