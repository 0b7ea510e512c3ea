//! Journal statistics use case

use crate::application::EntryService;
use crate::domain::stats::JournalStats;
use crate::error::Result;
use crate::infrastructure::{DayStore, Settings};
use chrono::NaiveDate;

/// Statistics over every readable day
pub fn journal_stats<S: DayStore>(
    store: &S,
    settings: &Settings,
    today: NaiveDate,
) -> Result<JournalStats> {
    let days = store.list_days()?;
    let entries = EntryService::new(store, settings).all_entries()?;
    Ok(JournalStats::compute(&days, &entries, store.naming(), today))
}
