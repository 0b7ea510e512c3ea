//! Domain layer - Business logic and domain models

pub mod backup;
pub mod date_ref;
pub mod day;
pub mod editor;
pub mod entries;
pub mod search;
pub mod stats;
pub mod template;

pub use backup::BackupFrequency;
pub use date_ref::DateRef;
pub use day::{DayFile, DayNaming};
pub use entries::{EntryFormat, JournalEntry, TagStyle};
pub use search::SearchPredicate;
pub use stats::JournalStats;
pub use template::EntryTemplate;
