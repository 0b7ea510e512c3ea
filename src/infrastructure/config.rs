//! Settings management

use crate::domain::backup::BackupFrequency;
use crate::domain::day::{DayNaming, DEFAULT_DATE_FORMAT};
use crate::domain::entries::detect::DEFAULT_TAG_PREFIXES;
use crate::domain::entries::TagStyle;
use crate::error::{DaybookError, ReadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "DAYBOOK_SETTINGS";

/// Settings keys accepted by [`Settings::get`] and [`Settings::set`]
pub const SETTINGS_KEYS: &[&str] = &[
    "journal_directory",
    "backup_directory",
    "templates_directory",
    "default_editor",
    "date_format",
    "tag_style",
    "tag_prefixes",
    "auto_detect_tags",
    "use_timestamp",
    "auto_backup",
    "backup_frequency",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub journal_directory: PathBuf,
    pub backup_directory: PathBuf,
    pub templates_directory: PathBuf,
    pub default_editor: String,
    pub date_format: String,
    pub tag_style: TagStyle,
    pub tag_prefixes: Vec<String>,
    pub auto_detect_tags: bool,
    pub use_timestamp: bool,
    pub auto_backup: bool,
    pub backup_frequency: BackupFrequency,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            journal_directory: PathBuf::from("~/journal/daily"),
            backup_directory: PathBuf::from("~/journal/backups"),
            templates_directory: PathBuf::from("~/journal/templates"),
            default_editor: default_editor(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            tag_style: TagStyle::default(),
            tag_prefixes: DEFAULT_TAG_PREFIXES.iter().map(|p| p.to_string()).collect(),
            auto_detect_tags: true,
            use_timestamp: true,
            auto_backup: true,
            backup_frequency: BackupFrequency::default(),
        }
    }
}

fn default_editor() -> String {
    if cfg!(windows) {
        "notepad".to_string()
    } else {
        "nano".to_string()
    }
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Settings file to use: explicit path, then `DAYBOOK_SETTINGS`, then
/// `~/.daybook/settings.json`
pub fn settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".daybook").join("settings.json"))
        .ok_or_else(|| {
            DaybookError::Config(format!(
                "Could not determine home directory. Set {} to a settings file path.",
                SETTINGS_ENV
            ))
        })
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file missing, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => return Err(ReadError::from_io(path.to_path_buf(), e).into()),
        };

        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Check the values that can't be checked by deserialization alone
    pub fn validate(&self) -> Result<()> {
        self.naming()?;

        if self.tag_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(DaybookError::Config(
                "Tag prefixes must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn naming(&self) -> Result<DayNaming> {
        DayNaming::new(&self.date_format)
    }

    pub fn journal_dir(&self) -> PathBuf {
        expand_home(&self.journal_directory)
    }

    pub fn backup_dir(&self) -> PathBuf {
        expand_home(&self.backup_directory)
    }

    pub fn templates_dir(&self) -> PathBuf {
        expand_home(&self.templates_directory)
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.default_editor.clone())
    }

    /// Get a single setting as display text
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "journal_directory" => self.journal_directory.display().to_string(),
            "backup_directory" => self.backup_directory.display().to_string(),
            "templates_directory" => self.templates_directory.display().to_string(),
            "default_editor" => self.default_editor.clone(),
            "date_format" => self.date_format.clone(),
            "tag_style" => self.tag_style.as_str().to_string(),
            "tag_prefixes" => self.tag_prefixes.join(" "),
            "auto_detect_tags" => self.auto_detect_tags.to_string(),
            "use_timestamp" => self.use_timestamp.to_string(),
            "auto_backup" => self.auto_backup.to_string(),
            "backup_frequency" => self.backup_frequency.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a single setting from text, validating the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();

        match key {
            "journal_directory" => updated.journal_directory = PathBuf::from(value),
            "backup_directory" => updated.backup_directory = PathBuf::from(value),
            "templates_directory" => updated.templates_directory = PathBuf::from(value),
            "default_editor" => updated.default_editor = value.to_string(),
            "date_format" => updated.date_format = value.to_string(),
            "tag_style" => updated.tag_style = value.parse().map_err(DaybookError::Config)?,
            "tag_prefixes" => {
                updated.tag_prefixes = value
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "auto_detect_tags" => updated.auto_detect_tags = parse_bool(key, value)?,
            "use_timestamp" => updated.use_timestamp = parse_bool(key, value)?,
            "auto_backup" => updated.auto_backup = parse_bool(key, value)?,
            "backup_frequency" => {
                updated.backup_frequency = value.parse().map_err(DaybookError::Config)?
            }
            _ => return Err(unknown_key(key)),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn unknown_key(key: &str) -> DaybookError {
    DaybookError::Config(format!(
        "Unknown settings key: '{}'. Valid keys are: {}",
        key,
        SETTINGS_KEYS.join(", ")
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(DaybookError::Config(format!(
            "Invalid value for {}: '{}' (expected true or false)",
            key, value
        ))),
    }
}
