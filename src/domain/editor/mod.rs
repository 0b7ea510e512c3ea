//! In-process line editor
//!
//! [`TextBuffer`] holds the lines, cursor and viewport; [`EditSession`] runs
//! the save/quit state machine on top of it.

pub mod buffer;
pub mod session;

pub use buffer::{Cursor, TextBuffer};
pub use session::{open_editor, transition, EditSession, EditorEvent, EditorState, Key};
