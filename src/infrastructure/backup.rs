//! Backup snapshots on disk

use crate::domain::backup::{file_backup_name, full_backup_name, should_backup, BackupFrequency};
use crate::error::Result;
use crate::infrastructure::config::Settings;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// What to snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupTarget {
    /// One day file, by path
    File(PathBuf),
    /// The whole journal directory
    Journal,
}

/// Result of a backup attempt. Failures are values so callers can carry on
/// with the write that triggered the backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created(PathBuf),
    NotDue,
    Disabled,
    Failed(String),
}

/// Takes frequency-gated snapshots into the backup directory
#[derive(Debug, Clone)]
pub struct BackupManager {
    journal_dir: PathBuf,
    backup_dir: PathBuf,
    frequency: BackupFrequency,
    enabled: bool,
}

impl BackupManager {
    pub fn new(
        journal_dir: PathBuf,
        backup_dir: PathBuf,
        frequency: BackupFrequency,
        enabled: bool,
    ) -> Self {
        BackupManager {
            journal_dir,
            backup_dir,
            frequency,
            enabled,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        BackupManager::new(
            settings.journal_dir(),
            settings.backup_dir(),
            settings.backup_frequency,
            settings.auto_backup,
        )
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Names of entries in the backup directory
    pub fn existing_backups(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.backup_dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect()
    }

    /// Back up `target` if auto backup is on and a backup is due
    pub fn maybe_backup(&self, target: &BackupTarget, now: NaiveDateTime) -> BackupOutcome {
        if !self.enabled {
            return BackupOutcome::Disabled;
        }

        if !should_backup(&self.existing_backups(), self.frequency, now) {
            debug!(frequency = %self.frequency, "backup not due");
            return BackupOutcome::NotDue;
        }

        self.backup(target, now)
    }

    /// Snapshot `target` unconditionally
    pub fn backup(&self, target: &BackupTarget, now: NaiveDateTime) -> BackupOutcome {
        let result = match target {
            BackupTarget::File(path) => self.backup_file(path, now),
            BackupTarget::Journal => self.backup_journal(now),
        };

        match result {
            Ok(path) => {
                info!(path = %path.display(), "backup created");
                BackupOutcome::Created(path)
            }
            Err(e) => {
                warn!(error = %e, "backup failed");
                BackupOutcome::Failed(e.to_string())
            }
        }
    }

    fn backup_file(&self, source: &Path, now: NaiveDateTime) -> Result<PathBuf> {
        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("day.md");

        fs::create_dir_all(&self.backup_dir)?;
        let dest = self.backup_dir.join(file_backup_name(filename, now));
        fs::copy(source, &dest)?;
        Ok(dest)
    }

    fn backup_journal(&self, now: NaiveDateTime) -> Result<PathBuf> {
        if !self.journal_dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Journal directory not found: {}", self.journal_dir.display()),
            )
            .into());
        }

        let dest_root = self.backup_dir.join(full_backup_name(now));
        fs::create_dir_all(&dest_root)?;

        // The backup directory may live inside the journal directory
        let skip = self.backup_dir.clone();
        let walker = WalkDir::new(&self.journal_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || !entry.path().starts_with(&skip));

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let Ok(rel) = entry.path().strip_prefix(&self.journal_dir) else {
                continue;
            };
            if rel.as_os_str().is_empty() {
                continue;
            }

            let dest = dest_root.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest)?;
            } else if entry.file_type().is_file() {
                fs::copy(entry.path(), &dest)?;
            }
        }

        Ok(dest_root)
    }
}
