//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What `init` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Settings were written (false when the file already existed)
    pub settings_written: bool,
    /// Directories that had to be created
    pub created_dirs: Vec<PathBuf>,
}

/// Write default settings if absent, then create the journal, backup and
/// template directories.
pub fn init(settings_path: &Path) -> Result<(Settings, InitReport)> {
    let settings_written = !settings_path.exists();
    let settings = if settings_written {
        let settings = Settings::default();
        settings.save(settings_path)?;
        settings
    } else {
        Settings::load(settings_path)?
    };

    let mut created_dirs = Vec::new();
    for dir in [
        settings.journal_dir(),
        settings.backup_dir(),
        settings.templates_dir(),
    ] {
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            created_dirs.push(dir);
        }
    }

    info!(settings = %settings_path.display(), created = created_dirs.len(), "journal initialized");

    Ok((
        settings,
        InitReport {
            settings_written,
            created_dirs,
        },
    ))
}
