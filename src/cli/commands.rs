//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(about = "Daily journal of heading-delimited entries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (default: $DAYBOOK_SETTINGS, then ~/.daybook/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write default settings and create the journal directories
    Init,

    /// Append a new entry to today's file
    New {
        /// Entry title
        #[arg(short, long)]
        title: Option<String>,

        /// Entry body ("-" reads it from stdin)
        #[arg(short, long)]
        body: Option<String>,

        /// Tags (repeat or comma-separate)
        #[arg(short = 'g', long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        /// Start from a template (see `daybook templates`)
        #[arg(long)]
        template: Option<String>,
    },

    /// List day files, newest first
    Days {
        /// Show at most N days
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print the raw text of a day
    Show {
        /// today, yesterday or YYYY-MM-DD
        #[arg(default_value = "today")]
        date: String,
    },

    /// List entries of one day, or of every day
    Entries {
        /// today, yesterday or YYYY-MM-DD (default: all days)
        date: Option<String>,
    },

    /// Edit a day (or one entry) in the external editor
    Edit {
        /// today, yesterday or YYYY-MM-DD
        #[arg(default_value = "today")]
        date: String,

        /// Edit only the entry with this index
        #[arg(short, long)]
        entry: Option<usize>,
    },

    /// Search entries across all days
    Search {
        /// Text to look for in titles, tags and bodies
        text: Option<String>,

        /// Match text case-sensitively
        #[arg(short = 'c', long)]
        case_sensitive: bool,

        /// Entries with any of these tags (repeat or comma-separate)
        #[arg(short = 'g', long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        /// Earliest day (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Latest day (inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Minimum body word count
        #[arg(long)]
        min_words: Option<usize>,

        /// Maximum body word count
        #[arg(long)]
        max_words: Option<usize>,

        /// Regular expression over title, tags and body
        #[arg(short, long)]
        regex: Option<String>,
    },

    /// Delete one entry from a day
    DeleteEntry {
        /// today, yesterday or YYYY-MM-DD
        date: String,

        /// Entry index (see `daybook entries`)
        index: usize,

        /// Only delete if the entry has this title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a whole day file
    DeleteDay {
        /// today, yesterday or YYYY-MM-DD
        date: String,

        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Back up the whole journal
    Backup {
        /// Ignore backup frequency and the auto_backup switch
        #[arg(short, long)]
        force: bool,
    },

    /// Show journal statistics
    Stats,

    /// List entry templates
    Templates,

    /// View or modify settings
    Config {
        /// Settings key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all settings
        #[arg(short, long)]
        list: bool,

        /// Restore every setting to its default
        #[arg(long, conflicts_with_all = ["key", "list"])]
        reset: bool,

        /// Confirm --reset
        #[arg(long, requires = "reset")]
        yes: bool,
    },
}
