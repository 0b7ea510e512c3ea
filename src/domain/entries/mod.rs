//! Journal entries: the heading-delimited sections of a day file
//!
//! A day's raw text is split into entries at `# <title>` lines. How tags are
//! written down differs between journals, so the text format sits behind the
//! [`EntryFormat`] trait with two implementations:
//!
//! - [`TagsLineFormat`]: a `tags: a, b` line right under the heading
//! - [`TrailingTagsFormat`]: a final `@a @b` line at the end of the body
//!
//! # Examples
//!
//! ```
//! use daybook::domain::entries::{parse_entries, serialize_entries};
//!
//! let entries = parse_entries("# A\ntags: x, y\nbody1\n\n# B\n\nbody2", "2025-01-17.md");
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[0].tags, vec!["x", "y"]);
//! assert_eq!(parse_entries(&serialize_entries(&entries), "2025-01-17.md"), entries);
//! ```

pub mod detect;
pub mod tags_line;
pub mod trailing;

pub use detect::{detect_tags, merge_tags};
pub use tags_line::TagsLineFormat;
pub use trailing::TrailingTagsFormat;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One heading-delimited section of a day file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub title: String,
    /// Ordered, without duplicates
    pub tags: Vec<String>,
    pub body: String,
    /// 0-based position within the day
    pub entry_index: usize,
    /// Filename of the day this entry was parsed from
    pub day: String,
}

impl JournalEntry {
    /// Create a detached entry (not yet placed in a day)
    pub fn new(title: &str, tags: Vec<String>, body: &str) -> Self {
        JournalEntry {
            title: title.trim().to_string(),
            tags: normalize_tags(tags),
            body: body.trim().to_string(),
            entry_index: 0,
            day: String::new(),
        }
    }

    /// Title, tags and body joined into one searchable string
    pub fn flattened(&self) -> String {
        format!("{} {} {}", self.title, self.tags.join(", "), self.body)
    }

    /// Words in the body, split on whitespace
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Text format of a day file
pub trait EntryFormat {
    /// Split raw day text into ordered entries
    fn parse(&self, raw: &str, day: &str) -> Vec<JournalEntry>;

    /// Write entries back out, in `entry_index` order
    fn serialize(&self, entries: &[JournalEntry]) -> String;

    /// Tags as this format reads them back after writing them
    fn canonical_tags(&self, tags: &[String]) -> Vec<String> {
        normalize_tags(tags)
    }

    /// Text of a single entry, as shown in a single-entry edit session
    fn render_entry(&self, entry: &JournalEntry) -> String {
        self.serialize(std::slice::from_ref(entry))
    }

    /// Rebuild a whole day from its preamble and entries
    fn rebuild_day(&self, preamble: &str, entries: &[JournalEntry]) -> String {
        let preamble = preamble.trim();
        let body = self.serialize(entries);

        match (preamble.is_empty(), body.is_empty()) {
            (true, _) => body,
            (false, true) => preamble.to_string(),
            (false, false) => format!("{}\n\n{}", preamble, body),
        }
    }
}

/// Which tag convention a journal uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TagStyle {
    /// `tags: a, b` under the heading
    #[default]
    TagsLine,
    /// `@a @b` as the last body line
    Trailing,
}

impl TagStyle {
    pub fn format(&self) -> &'static dyn EntryFormat {
        match self {
            TagStyle::TagsLine => &TagsLineFormat,
            TagStyle::Trailing => &TrailingTagsFormat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagStyle::TagsLine => "tags_line",
            TagStyle::Trailing => "trailing",
        }
    }
}

impl FromStr for TagStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tags_line" | "tags-line" => Ok(TagStyle::TagsLine),
            "trailing" => Ok(TagStyle::Trailing),
            _ => Err(format!(
                "Invalid tag style: '{}'. Valid styles are: tags_line, trailing",
                s
            )),
        }
    }
}

/// Parse with the default (`tags:` line) format
pub fn parse_entries(raw: &str, day: &str) -> Vec<JournalEntry> {
    TagsLineFormat.parse(raw, day)
}

/// Serialize with the default (`tags:` line) format
pub fn serialize_entries(entries: &[JournalEntry]) -> String {
    TagsLineFormat.serialize(entries)
}

/// Title of a heading line (`# <title>`), if `line` is one
pub fn heading_title(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix("# ").map(str::trim)
}

/// Split raw text into the part before the first heading and the rest
pub fn split_preamble(raw: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        // Same heading test as `parse`, which sees lines without terminators
        if heading_title(line.trim_end_matches(['\r', '\n'])).is_some() {
            return (&raw[..offset], &raw[offset..]);
        }
        offset += line.len();
    }
    (raw, "")
}

/// Trim tags, drop empty ones and duplicates, keeping first occurrence
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !unique.iter().any(|t| t == tag) {
            unique.push(tag.to_string());
        }
    }
    unique
}

/// Entry being accumulated while scanning lines
#[derive(Debug)]
pub(crate) struct OpenEntry<'a> {
    pub title: String,
    pub tags: Vec<String>,
    pub body: Vec<&'a str>,
}

impl<'a> OpenEntry<'a> {
    pub fn new(title: &str) -> Self {
        OpenEntry {
            title: title.to_string(),
            tags: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Drop blank lines at the end of the body
    pub fn trim_trailing_blank(&mut self) {
        while self.body.last().is_some_and(|l| l.trim().is_empty()) {
            self.body.pop();
        }
    }

    pub fn close(self, entry_index: usize, day: &str) -> JournalEntry {
        JournalEntry {
            title: self.title,
            tags: self.tags,
            body: self.body.join("\n").trim().to_string(),
            entry_index,
            day: day.to_string(),
        }
    }
}

/// Entries ordered by `entry_index`
pub(crate) fn in_index_order(entries: &[JournalEntry]) -> Vec<&JournalEntry> {
    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.entry_index);
    ordered
}

/// Join lines after dropping trailing blank ones
pub(crate) fn join_trimmed(mut lines: Vec<String>) -> String {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
