//! Error types for daybook

use std::path::PathBuf;
use thiserror::Error;

/// Why a day file could not be read.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Encoding error reading {0}: file is not valid UTF-8")]
    Decode(PathBuf),

    #[error("Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Classify an I/O error raised while reading `path`
    pub fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ReadError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => ReadError::PermissionDenied(path),
            std::io::ErrorKind::InvalidData => ReadError::Decode(path),
            _ => ReadError::Io { path, source: err },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadError::NotFound(_))
    }
}

/// Main error type for daybook
#[derive(Debug, Error)]
pub enum DaybookError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl DaybookError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DaybookError::Read(ReadError::NotFound(_)) => 2,
            DaybookError::InvalidDate(_) => 3,
            DaybookError::EntryNotFound(_) => 4,
            DaybookError::InvalidPattern(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DaybookError::Read(ReadError::NotFound(path)) => {
                format!(
                    "No journal file at {}\n\n\
                    Suggestions:\n\
                    • Use 'daybook days' to see which days exist\n\
                    • Create an entry first: daybook new --title \"...\"\n\
                    • Check journal_directory with 'daybook config journal_directory'",
                    path.display()
                )
            }
            DaybookError::Read(ReadError::PermissionDenied(path)) => {
                format!(
                    "Permission denied: {}\n\nPlease check file permissions.",
                    path.display()
                )
            }
            DaybookError::Read(ReadError::Decode(path)) => {
                format!(
                    "Could not decode {}\n\nFile may be corrupted or use a different encoding.",
                    path.display()
                )
            }
            DaybookError::InvalidDate(value) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2025-01-17)",
                    value
                )
            }
            DaybookError::EntryNotFound(what) => {
                format!(
                    "Entry not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'daybook entries <DATE>' to see entry indexes and titles\n\
                    • Nothing was changed",
                    what
                )
            }
            DaybookError::InvalidPattern(msg) => {
                format!(
                    "Invalid search pattern: {}\n\n\
                    Regular expressions use Rust regex syntax (e.g., 'meet(ing)?s?')",
                    msg
                )
            }
            DaybookError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: daybook config default_editor vim",
                    msg
                )
            }
            DaybookError::Config(msg) if msg.contains("date format") => {
                format!(
                    "{}\n\n\
                    date_format uses strftime syntax, e.g. %Y-%m-%d\n\
                    Example: daybook config date_format %Y-%m-%d",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DaybookError
pub type Result<T> = std::result::Result<T, DaybookError>;
