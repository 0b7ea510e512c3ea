//! Infrastructure layer - External I/O and persistence

pub mod backup;
pub mod config;
pub mod editor;
pub mod logging;
pub mod store;

pub use backup::{BackupManager, BackupOutcome, BackupTarget};
pub use config::Settings;
pub use editor::ExternalEditor;
pub use store::{DayStore, FileSystemStore};
