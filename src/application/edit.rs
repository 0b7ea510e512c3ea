//! Editing days and single entries
//!
//! A front-end opens a [`DayEditSession`], feeds it keys through
//! [`DayEditor::handle_key`] and gets `Saved` text persisted for free.

use crate::application::EntryService;
use crate::domain::editor::{open_editor, EditSession, EditorEvent, Key};
use crate::error::{DaybookError, Result};
use crate::infrastructure::{DayStore, ExternalEditor, Settings};
use tracing::debug;

/// What an edit session writes back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// A whole day file
    Day(String),
    /// One entry of a day file
    Entry { day: String, index: usize },
}

/// An edit session bound to the day text it came from
#[derive(Debug)]
pub struct DayEditSession {
    target: EditTarget,
    /// Title the entry must still have when saving
    expected_title: Option<String>,
    /// Entries the last save left in the day, starting at the target index
    span: usize,
    session: EditSession,
}

impl DayEditSession {
    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }
}

/// Service opening edit sessions over days and persisting their saves
pub struct DayEditor<'a, S: DayStore> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: DayStore> DayEditor<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        DayEditor { store, settings }
    }

    /// Raw text of a day, empty when it doesn't exist yet
    fn day_text(&self, filename: &str) -> Result<String> {
        match self.store.read_day_file(filename) {
            Ok(text) => Ok(text),
            Err(e) if e.is_not_found() => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Start editing a whole day
    pub fn open_day(&self, filename: &str, viewport_height: usize) -> Result<DayEditSession> {
        let text = self.day_text(filename)?;
        Ok(DayEditSession {
            target: EditTarget::Day(filename.to_string()),
            expected_title: None,
            span: 0,
            session: open_editor(&text, viewport_height),
        })
    }

    /// Start editing one entry of a day
    pub fn open_entry(
        &self,
        filename: &str,
        index: usize,
        viewport_height: usize,
    ) -> Result<DayEditSession> {
        let entries = EntryService::new(self.store, self.settings).entries_for_day(filename)?;
        let entry = entries.get(index).ok_or_else(|| {
            DaybookError::EntryNotFound(format!("{} has no entry #{}", filename, index))
        })?;

        let text = self.settings.tag_style.format().render_entry(entry);
        Ok(DayEditSession {
            target: EditTarget::Entry {
                day: filename.to_string(),
                index,
            },
            expected_title: Some(entry.title.clone()),
            span: 1,
            session: open_editor(&text, viewport_height),
        })
    }

    /// Feed a key to the session, writing `Saved` text back to the store
    pub fn handle_key(&self, edit: &mut DayEditSession, key: Key) -> Result<EditorEvent> {
        let event = edit.session.handle_key(key);
        if let EditorEvent::Saved(text) = &event {
            self.save(edit, text)?;
        }
        Ok(event)
    }

    fn save(&self, edit: &mut DayEditSession, text: &str) -> Result<()> {
        match &edit.target {
            EditTarget::Day(filename) => self.store.write_day_file(filename, text)?,
            EditTarget::Entry { day, index } => {
                // A buffer that grew new headings now covers that many entries
                edit.span = EntryService::new(self.store, self.settings).replace_entries(
                    day,
                    *index,
                    edit.span,
                    edit.expected_title.as_deref(),
                    text,
                )?;

                // Later saves check against the title just written
                let format = self.settings.tag_style.format();
                if let Some(first) = format.parse(text, day).first() {
                    edit.expected_title = Some(first.title.clone());
                }
            }
        }
        debug!(edit_target = ?edit.target, "edit saved");
        Ok(())
    }

    /// Edit a day in an external editor; returns whether it changed
    pub fn edit_day_external(&self, filename: &str, editor: &ExternalEditor) -> Result<bool> {
        let before = self.day_text(filename)?;
        let after = editor.edit_text(&before, filename)?;

        if after == before {
            return Ok(false);
        }
        self.store.write_day_file(filename, &after)?;
        Ok(true)
    }

    /// Edit one entry in an external editor; returns whether it changed
    pub fn edit_entry_external(
        &self,
        filename: &str,
        index: usize,
        editor: &ExternalEditor,
    ) -> Result<bool> {
        let edit = self.open_entry(filename, index, 1)?;
        let before = edit.session.buffer().text();
        let after = editor.edit_text(&before, filename)?;

        if after.trim_end() == before.trim_end() {
            return Ok(false);
        }
        EntryService::new(self.store, self.settings).replace_entry(
            filename,
            index,
            edit.expected_title.as_deref(),
            &after,
        )?;
        Ok(true)
    }
}
