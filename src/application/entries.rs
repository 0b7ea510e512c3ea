//! Entry listing and entry-level rewrites of a day

use crate::domain::entries::{split_preamble, EntryFormat, JournalEntry};
use crate::error::{DaybookError, Result};
use crate::infrastructure::{DayStore, Settings};
use tracing::{info, warn};

/// Service for reading and rewriting the entries of day files
pub struct EntryService<'a, S: DayStore> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: DayStore> EntryService<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        EntryService { store, settings }
    }

    fn format(&self) -> &'static dyn EntryFormat {
        self.settings.tag_style.format()
    }

    /// Entries of one day file, in file order
    pub fn entries_for_day(&self, filename: &str) -> Result<Vec<JournalEntry>> {
        let raw = self.store.read_day_file(filename)?;
        Ok(self.format().parse(&raw, filename))
    }

    /// Entries of every day, newest day first. Days that can't be read are
    /// logged and skipped.
    pub fn all_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = Vec::new();

        for day in self.store.list_days()? {
            match self.store.read_day_file(&day.filename) {
                Ok(raw) => entries.extend(self.format().parse(&raw, &day.filename)),
                Err(e) => warn!(day = %day.filename, error = %e, "skipping unreadable day"),
            }
        }

        Ok(entries)
    }

    /// Remove entry `index` from a day. When `expected_title` is given it must
    /// match, so a stale index can't remove the wrong entry.
    pub fn delete_entry(
        &self,
        filename: &str,
        index: usize,
        expected_title: Option<&str>,
    ) -> Result<JournalEntry> {
        let raw = self.store.read_day_file(filename)?;
        let (preamble, _) = split_preamble(&raw);
        let mut entries = self.format().parse(&raw, filename);

        locate(&entries, filename, index, expected_title)?;
        let removed = entries.remove(index);
        reindex(&mut entries);

        self.store
            .write_day_file(filename, &self.format().rebuild_day(preamble, &entries))?;
        info!(day = %filename, index, title = %removed.title, "entry deleted");
        Ok(removed)
    }

    /// Replace entry `index` with the entries written in `new_text`.
    ///
    /// Text without a heading keeps the old title and tags; blank text removes
    /// the entry.
    pub fn replace_entry(
        &self,
        filename: &str,
        index: usize,
        expected_title: Option<&str>,
        new_text: &str,
    ) -> Result<()> {
        self.replace_entries(filename, index, 1, expected_title, new_text)?;
        Ok(())
    }

    /// Replace the `count` entries starting at `index` with the entries
    /// written in `new_text`; returns how many entries took their place.
    ///
    /// `count == 0` inserts at `index`. The title check applies to the first
    /// replaced entry.
    pub fn replace_entries(
        &self,
        filename: &str,
        index: usize,
        count: usize,
        expected_title: Option<&str>,
        new_text: &str,
    ) -> Result<usize> {
        let raw = self.store.read_day_file(filename)?;
        let (preamble, _) = split_preamble(&raw);
        let mut entries = self.format().parse(&raw, filename);

        if count > 0 {
            locate(&entries, filename, index, expected_title)?;
        }
        if index + count > entries.len() {
            return Err(DaybookError::EntryNotFound(format!(
                "{} has no entries #{}..#{} ({} entries)",
                filename,
                index,
                index + count,
                entries.len()
            )));
        }

        let mut replacement = self.format().parse(new_text, filename);
        if replacement.is_empty() && !new_text.trim().is_empty() {
            let (title, tags) = match entries.get(index).filter(|_| count > 0) {
                Some(old) => (old.title.clone(), old.tags.clone()),
                None => (expected_title.unwrap_or_default().to_string(), Vec::new()),
            };
            replacement.push(JournalEntry::new(&title, tags, new_text));
        }

        let written = replacement.len();
        entries.splice(index..index + count, replacement);
        reindex(&mut entries);

        self.store
            .write_day_file(filename, &self.format().rebuild_day(preamble, &entries))?;
        info!(day = %filename, index, replaced = count, written, "entries replaced");
        Ok(written)
    }
}

/// Check that entry `index` exists and carries the expected title
fn locate(
    entries: &[JournalEntry],
    filename: &str,
    index: usize,
    expected_title: Option<&str>,
) -> Result<()> {
    let Some(entry) = entries.get(index) else {
        return Err(DaybookError::EntryNotFound(format!(
            "{} has no entry #{} ({} entries)",
            filename,
            index,
            entries.len()
        )));
    };

    if let Some(expected) = expected_title {
        if entry.title != expected.trim() {
            return Err(DaybookError::EntryNotFound(format!(
                "entry #{} of {} is '{}', not '{}'",
                index, filename, entry.title, expected
            )));
        }
    }

    Ok(())
}

fn reindex(entries: &mut [JournalEntry]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.entry_index = i;
    }
}
