//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_backup_outcome, format_day_list, format_entry_list, format_search_results,
    format_stats, format_template_list,
};
