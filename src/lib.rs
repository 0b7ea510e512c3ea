//! daybook - Daily journal store
//!
//! Each calendar day is one markdown-like file holding `# `-headed entries.
//! The crate parses and rewrites those files, edits them through a
//! line-buffer state machine, searches across days and keeps
//! frequency-gated backups.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DaybookError;
