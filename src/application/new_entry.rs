//! New entry use case

use crate::domain::entries::{detect_tags, merge_tags, normalize_tags, JournalEntry};
use crate::domain::template::load_template;
use crate::error::Result;
use crate::infrastructure::{DayStore, Settings};
use chrono::NaiveDateTime;
use tracing::info;

/// Prefix put in front of titles when `use_timestamp` is on
pub const TITLE_TIMESTAMP_FORMAT: &str = "[%Y-%m-%d %H:%M:%S] ";

/// Title used when nothing else provides one
const UNTITLED: &str = "Untitled";

/// What the user asked for; blanks are filled from the template
#[derive(Debug, Clone, Default)]
pub struct NewEntryRequest {
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub body: String,
    pub template: Option<String>,
}

/// Service for appending new entries to a day
pub struct NewEntryService<'a, S: DayStore> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: DayStore> NewEntryService<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        NewEntryService { store, settings }
    }

    /// Build the entry without storing it
    pub fn build(&self, request: &NewEntryRequest, now: NaiveDateTime) -> Result<JournalEntry> {
        let template = match &request.template {
            Some(name) => Some(load_template(&self.settings.templates_dir(), name)?.render(now.date())),
            None => None,
        };

        let base_title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or(template.as_ref().map(|t| t.title.as_str()))
            .unwrap_or("");

        let title = if self.settings.use_timestamp {
            format!("{}{}", now.format(TITLE_TIMESTAMP_FORMAT), base_title)
        } else {
            base_title.to_string()
        };
        let title = match title.trim() {
            "" => UNTITLED.to_string(),
            t => t.to_string(),
        };

        let body = [
            template.as_ref().map(|t| t.body.as_str()).unwrap_or(""),
            request.body.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n");

        let mut tags = request.tags.clone();
        if let Some(template) = &template {
            tags.extend(template.tags.iter().cloned());
        }
        let mut tags = normalize_tags(tags);

        if self.settings.auto_detect_tags {
            let detected = detect_tags(&body, &self.settings.tag_prefixes);
            tags = merge_tags(&tags, &detected);
        }
        let tags = self.settings.tag_style.format().canonical_tags(&tags);

        Ok(JournalEntry::new(&title, tags, &body))
    }

    /// Append a new entry to the day of `now`; returns it as stored
    pub fn execute(&self, request: &NewEntryRequest, now: NaiveDateTime) -> Result<JournalEntry> {
        let mut entry = self.build(request, now)?;
        let format = self.settings.tag_style.format();
        let date = now.date();

        let existing = match self.store.read_day(date) {
            Ok(raw) => format.parse(&raw, "").len(),
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e.into()),
        };

        self.store.append_entry(date, &format.render_entry(&entry))?;

        entry.day = self.store.naming().filename_for_date(date);
        entry.entry_index = existing;
        info!(day = %entry.day, index = entry.entry_index, title = %entry.title, "entry added");
        Ok(entry)
    }
}
