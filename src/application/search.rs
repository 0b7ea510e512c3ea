//! Search use case

use crate::application::EntryService;
use crate::domain::search::{search, sort_recent_first, SearchPredicate};
use crate::domain::entries::JournalEntry;
use crate::error::Result;
use crate::infrastructure::{DayStore, Settings};
use tracing::debug;

/// Service for searching entries across all days
pub struct SearchService<'a, S: DayStore> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: DayStore> SearchService<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        SearchService { store, settings }
    }

    /// Matching entries, most recent first
    pub fn search(&self, predicate: &SearchPredicate) -> Result<Vec<JournalEntry>> {
        let entries = EntryService::new(self.store, self.settings).all_entries()?;
        let naming = self.store.naming();

        let mut hits = search(&entries, predicate, naming);
        sort_recent_first(&mut hits, naming);

        debug!(scanned = entries.len(), hits = hits.len(), "search finished");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::day::DayNaming;
    use crate::infrastructure::FileSystemStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileSystemStore, Settings) {
        let temp = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp.path().join("daily"), DayNaming::default());
        store
            .write_day_file("2025-01-15.md", "# Plan\ntags: work\n\nlaunch prep")
            .unwrap();
        store
            .write_day_file("2025-01-17.md", "# Run\ntags: fitness\n\n5k\n\n# Review\ntags: work\n\nlaunch went fine")
            .unwrap();
        (temp, store, Settings::default())
    }

    fn titles(entries: &[JournalEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_substring_across_days() {
        let (_temp, store, settings) = setup();
        let service = SearchService::new(&store, &settings);

        let hits = service.search(&SearchPredicate::substring("LAUNCH", false)).unwrap();
        assert_eq!(titles(&hits), vec!["Review", "Plan"]);
    }

    #[test]
    fn test_empty_query_lists_everything_recent_first() {
        let (_temp, store, settings) = setup();
        let hits = SearchService::new(&store, &settings)
            .search(&SearchPredicate::substring("", false))
            .unwrap();
        assert_eq!(titles(&hits), vec!["Review", "Run", "Plan"]);
    }

    #[test]
    fn test_combined_filters() {
        let (_temp, store, settings) = setup();
        let day = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        let predicate = SearchPredicate::All(vec![
            SearchPredicate::tags(["work"]),
            SearchPredicate::date_range(day, day).unwrap(),
        ]);

        let hits = SearchService::new(&store, &settings).search(&predicate).unwrap();
        assert_eq!(titles(&hits), vec!["Review"]);
    }

    #[test]
    fn test_empty_journal() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp.path().join("none"), DayNaming::default());
        let settings = Settings::default();
        let hits = SearchService::new(&store, &settings)
            .search(&SearchPredicate::substring("", false))
            .unwrap();
        assert!(hits.is_empty());
    }
}
