//! Application layer - Use cases and orchestration

pub mod backup;
pub mod edit;
pub mod entries;
pub mod init;
pub mod manage_config;
pub mod new_entry;
pub mod search;
pub mod stats;

pub use edit::{DayEditSession, DayEditor, EditTarget};
pub use entries::EntryService;
pub use manage_config::ConfigService;
pub use new_entry::{NewEntryRequest, NewEntryService};
pub use search::SearchService;
