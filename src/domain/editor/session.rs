//! Edit session state machine
//!
//! Front-ends translate their own key events into [`Key`] and feed them to
//! [`EditSession::handle_key`]; the returned [`EditorEvent`] tells them when
//! to persist text or close the view.

use super::buffer::TextBuffer;

/// Editor input, independent of any terminal or GUI toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Save,
    Quit,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Editing,
    /// Quit was requested with unsaved changes
    ConfirmQuit,
    /// Session ended; further keys are ignored
    Terminal,
}

/// What the front-end has to do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Nothing beyond redrawing
    Continue,
    /// Persist this text. Ends the session when it came from the quit prompt.
    Saved(String),
    /// Session ended without saving the changes
    Discarded,
    /// Quit prompt dismissed, back to editing
    Cancelled,
    /// Session ended with nothing to save
    Closed,
}

/// Apply `key` in `state` to `buffer`
pub fn transition(
    state: EditorState,
    buffer: &mut TextBuffer,
    key: Key,
) -> (EditorState, EditorEvent) {
    match state {
        EditorState::Editing => editing(buffer, key),
        EditorState::ConfirmQuit => confirm_quit(buffer, key),
        EditorState::Terminal => (EditorState::Terminal, EditorEvent::Continue),
    }
}

fn editing(buffer: &mut TextBuffer, key: Key) -> (EditorState, EditorEvent) {
    match key {
        Key::Save => {
            buffer.mark_saved();
            return (EditorState::Editing, EditorEvent::Saved(buffer.text()));
        }
        Key::Quit | Key::Escape => {
            return if buffer.is_modified() {
                (EditorState::ConfirmQuit, EditorEvent::Continue)
            } else {
                (EditorState::Terminal, EditorEvent::Closed)
            };
        }
        Key::Char(c) => {
            buffer.insert_char(c);
        }
        Key::Enter => {
            buffer.insert_newline();
        }
        Key::Backspace => {
            buffer.backspace();
        }
        Key::Delete => {
            buffer.delete_forward();
        }
        Key::Left => {
            buffer.move_left();
        }
        Key::Right => {
            buffer.move_right();
        }
        Key::Up => {
            buffer.move_up();
        }
        Key::Down => {
            buffer.move_down();
        }
        Key::Home => {
            buffer.move_home();
        }
        Key::End => {
            buffer.move_end();
        }
        Key::PageUp => {
            buffer.page_up();
        }
        Key::PageDown => {
            buffer.page_down();
        }
    }

    (EditorState::Editing, EditorEvent::Continue)
}

fn confirm_quit(buffer: &mut TextBuffer, key: Key) -> (EditorState, EditorEvent) {
    match key {
        Key::Char('y') | Key::Char('Y') | Key::Save => {
            buffer.mark_saved();
            (EditorState::Terminal, EditorEvent::Saved(buffer.text()))
        }
        Key::Char('n') | Key::Char('N') => (EditorState::Terminal, EditorEvent::Discarded),
        Key::Char('c') | Key::Char('C') | Key::Escape => {
            (EditorState::Editing, EditorEvent::Cancelled)
        }
        _ => (EditorState::ConfirmQuit, EditorEvent::Continue),
    }
}

/// One editing session over one buffer
#[derive(Debug, Clone)]
pub struct EditSession {
    buffer: TextBuffer,
    state: EditorState,
}

impl EditSession {
    pub fn new(initial_text: &str, viewport_height: usize) -> Self {
        EditSession {
            buffer: TextBuffer::new(initial_text, viewport_height),
            state: EditorState::Editing,
        }
    }

    pub fn handle_key(&mut self, key: Key) -> EditorEvent {
        let (state, event) = transition(self.state, &mut self.buffer, key);
        self.state = state;
        event
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Resize the viewport from the front-end
    pub fn resize(&mut self, viewport_height: usize) {
        self.buffer.set_viewport_height(viewport_height);
    }

    pub fn is_finished(&self) -> bool {
        self.state == EditorState::Terminal
    }
}

/// Start a session over `initial_text`
pub fn open_editor(initial_text: &str, viewport_height: usize) -> EditSession {
    EditSession::new(initial_text, viewport_height)
}
