//! File system day store

use crate::domain::day::{DayFile, DayNaming};
use crate::error::{DaybookError, ReadError, Result};
use crate::infrastructure::backup::{BackupManager, BackupOutcome, BackupTarget};
use crate::infrastructure::config::Settings;
use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persistence of day files
pub trait DayStore {
    /// Naming scheme mapping dates to filenames
    fn naming(&self) -> &DayNaming;

    /// Raw text of the day file for `date`
    fn read_day(&self, date: NaiveDate) -> std::result::Result<String, ReadError> {
        self.read_day_file(&self.naming().filename_for_date(date))
    }

    /// Raw text of a day file by name
    fn read_day_file(&self, filename: &str) -> std::result::Result<String, ReadError>;

    /// Replace the whole day for `date`
    fn write_day(&self, date: NaiveDate, text: &str) -> Result<()> {
        self.write_day_file(&self.naming().filename_for_date(date), text)
    }

    /// Replace a whole day file by name
    fn write_day_file(&self, filename: &str, text: &str) -> Result<()>;

    /// Add an already formatted entry at the end of the day, creating it if needed
    fn append_entry(&self, date: NaiveDate, formatted: &str) -> Result<()>;

    /// Day files, most recent first
    fn list_days(&self) -> Result<Vec<DayFile>>;

    /// Remove a day file after snapshotting it
    fn delete_day(&self, filename: &str) -> Result<()>;
}

/// Day files in one directory
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
    naming: DayNaming,
    backups: Option<BackupManager>,
}

impl FileSystemStore {
    /// Create a store without backups
    pub fn new(root: PathBuf, naming: DayNaming) -> Self {
        FileSystemStore {
            root,
            naming,
            backups: None,
        }
    }

    /// Consult `backups` before overwriting or deleting a day
    pub fn with_backups(mut self, backups: BackupManager) -> Self {
        self.backups = Some(backups);
        self
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(FileSystemStore::new(settings.journal_dir(), settings.naming()?)
            .with_backups(BackupManager::from_settings(settings)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a day file, if `filename` is a plain name inside the root
    fn day_path(&self, filename: &str) -> Option<PathBuf> {
        let valid = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && filename != "."
            && filename != "..";
        valid.then(|| self.root.join(filename))
    }

    fn checked_path(&self, filename: &str) -> Result<PathBuf> {
        self.day_path(filename).ok_or_else(|| {
            DaybookError::Config(format!("Invalid day file name: '{}'", filename))
        })
    }

    fn snapshot(&self, path: &Path) {
        let Some(backups) = &self.backups else {
            return;
        };

        let now = Local::now().naive_local();
        match backups.maybe_backup(&BackupTarget::File(path.to_path_buf()), now) {
            BackupOutcome::Failed(reason) => {
                warn!(path = %path.display(), %reason, "continuing without backup")
            }
            outcome => debug!(path = %path.display(), ?outcome, "backup gate"),
        }
    }

    /// Write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.daybook-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("day.md"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl DayStore for FileSystemStore {
    fn naming(&self) -> &DayNaming {
        &self.naming
    }

    fn read_day_file(&self, filename: &str) -> std::result::Result<String, ReadError> {
        let path = self
            .day_path(filename)
            .ok_or_else(|| ReadError::NotFound(self.root.join(filename)))?;

        fs::read_to_string(&path).map_err(|e| ReadError::from_io(path, e))
    }

    fn write_day_file(&self, filename: &str, text: &str) -> Result<()> {
        let path = self.checked_path(filename)?;

        if path.exists() {
            self.snapshot(&path);
        }

        Self::write_atomic(&path, text)?;
        debug!(path = %path.display(), bytes = text.len(), "day written");
        Ok(())
    }

    fn append_entry(&self, date: NaiveDate, formatted: &str) -> Result<()> {
        let filename = self.naming.filename_for_date(date);

        let existing = match self.read_day_file(&filename) {
            Ok(text) => text,
            Err(e) if e.is_not_found() => String::new(),
            Err(e) => return Err(e.into()),
        };

        let existing = existing.trim_end();
        let text = if existing.is_empty() {
            formatted.to_string()
        } else {
            format!("{}\n\n{}", existing, formatted)
        };

        self.write_day_file(&filename, &text)
    }

    fn list_days(&self) -> Result<Vec<DayFile>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut days = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !DayNaming::is_day_file(&name) {
                continue;
            }

            let date = self.naming.date_from_filename(&name);
            days.push(DayFile::new(name, date));
        }

        // Newest first, undated after dated
        days.sort_by(|a, b| match (a.date, b.date) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.filename.cmp(&a.filename),
        });

        Ok(days)
    }

    fn delete_day(&self, filename: &str) -> Result<()> {
        // Read first so a missing or unreadable day aborts before anything changes
        self.read_day_file(filename)?;
        let path = self.checked_path(filename)?;

        self.snapshot(&path);
        fs::remove_file(&path)?;
        debug!(path = %path.display(), "day deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backup::BackupFrequency;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store(temp: &TempDir) -> FileSystemStore {
        FileSystemStore::new(temp.path().join("daily"), DayNaming::default())
    }

    #[test]
    fn test_read_missing_day_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = store(&temp).read_day(date(2025, 1, 17)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_and_read_day() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        store.write_day(date(2025, 1, 17), "# A\nbody").unwrap();
        assert_eq!(store.read_day(date(2025, 1, 17)).unwrap(), "# A\nbody");
        assert!(temp.path().join("daily").join("2025-01-17.md").exists());

        store.write_day(date(2025, 1, 17), "# B").unwrap();
        assert_eq!(store.read_day_file("2025-01-17.md").unwrap(), "# B");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.write_day_file("2025-01-17.md", "one").unwrap();
        store.write_day_file("2025-01-17.md", "two").unwrap();

        let names: Vec<String> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["2025-01-17.md"]);
    }

    #[test]
    fn test_invalid_bytes_are_decode_error() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.root().join("2025-01-17.md"), [0xff, 0xfe, 0x00]).unwrap();

        let err = store.read_day_file("2025-01-17.md").unwrap_err();
        assert!(matches!(err, ReadError::Decode(_)));
    }

    #[test]
    fn test_append_creates_then_separates() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let day = date(2025, 1, 17);

        store.append_entry(day, "# A\nfirst").unwrap();
        store.append_entry(day, "# B\nsecond").unwrap();

        assert_eq!(store.read_day(day).unwrap(), "# A\nfirst\n\n# B\nsecond");
    }

    #[test]
    fn test_path_traversal_rejected() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        assert!(store.write_day_file("../escape.md", "x").is_err());
        assert!(store.read_day_file("../escape.md").unwrap_err().is_not_found());
        assert!(!temp.path().join("escape.md").exists());
    }

    #[test]
    fn test_list_days_sorted_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        for name in ["2025-01-15.md", "2025-01-17.md", "notes.md", "2024-12-31.md"] {
            store.write_day_file(name, "x").unwrap();
        }
        fs::write(store.root().join("readme.txt"), "x").unwrap();
        fs::write(store.root().join(".hidden.md"), "x").unwrap();

        let names: Vec<String> = store
            .list_days()
            .unwrap()
            .into_iter()
            .map(|d| d.filename)
            .collect();
        assert_eq!(
            names,
            vec!["2025-01-17.md", "2025-01-15.md", "2024-12-31.md", "notes.md"]
        );
    }

    #[test]
    fn test_list_days_missing_root() {
        let temp = TempDir::new().unwrap();
        assert!(store(&temp).list_days().unwrap().is_empty());
    }

    #[test]
    fn test_delete_day() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.write_day_file("2025-01-17.md", "x").unwrap();

        store.delete_day("2025-01-17.md").unwrap();
        assert!(store.list_days().unwrap().is_empty());

        let err = store.delete_day("2025-01-17.md").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_overwrite_consults_backup_gate() {
        let temp = TempDir::new().unwrap();
        let backups = temp.path().join("backups");
        let store = store(&temp).with_backups(BackupManager::new(
            temp.path().join("daily"),
            backups.clone(),
            BackupFrequency::Daily,
            true,
        ));

        // First write creates the file; nothing to snapshot yet
        store.write_day_file("2025-01-17.md", "v1").unwrap();
        assert!(!backups.exists());

        store.write_day_file("2025-01-17.md", "v2").unwrap();
        store.write_day_file("2025-01-17.md", "v3").unwrap();

        let snapshots: Vec<PathBuf> = fs::read_dir(&backups)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(fs::read_to_string(&snapshots[0]).unwrap(), "v1");
        assert_eq!(store.read_day_file("2025-01-17.md").unwrap(), "v3");
    }
}
