//! Line buffer with a cursor and a scrolling viewport

/// Cursor position, both 0-indexed. `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Editable text as a list of lines.
///
/// Invariants, restored after every operation:
/// - `lines` is never empty
/// - `cursor.line < lines.len()` and `cursor.column <= line length`
/// - `viewport_offset <= cursor.line < viewport_offset + viewport_height`
///
/// Mutating operations return `true` when they changed something; at the
/// buffer edges they do nothing and return `false`.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    viewport_offset: usize,
    viewport_height: usize,
    modified: bool,
}

impl TextBuffer {
    /// Build a buffer from raw text. A zero viewport height is treated as 1.
    pub fn new(text: &str, viewport_height: usize) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();

        TextBuffer {
            lines,
            cursor: Cursor::default(),
            viewport_offset: 0,
            viewport_height: viewport_height.max(1),
            modified: false,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Buffer contents joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Clear the modified flag after the text was persisted
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Resize the viewport (e.g. on terminal resize)
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.scroll_to_cursor();
    }

    /// Lines currently inside the viewport
    pub fn visible_lines(&self) -> &[String] {
        let end = (self.viewport_offset + self.viewport_height).min(self.lines.len());
        &self.lines[self.viewport_offset..end]
    }

    /// Row of the cursor relative to the top of the viewport
    pub fn cursor_screen_row(&self) -> usize {
        self.cursor.line - self.viewport_offset
    }

    pub fn word_count(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.split_whitespace().count())
            .sum()
    }

    /// Characters in the joined text, newlines included
    pub fn char_count(&self) -> usize {
        let chars: usize = self.lines.iter().map(|l| l.chars().count()).sum();
        chars + self.lines.len() - 1
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    /// Byte offset of character `column` in `line`
    fn byte_index(&self, line: usize, column: usize) -> usize {
        let text = &self.lines[line];
        text.char_indices()
            .nth(column)
            .map_or(text.len(), |(i, _)| i)
    }

    /// Keep the cursor line inside the viewport
    fn scroll_to_cursor(&mut self) {
        if self.cursor.line < self.viewport_offset {
            self.viewport_offset = self.cursor.line;
        } else if self.cursor.line >= self.viewport_offset + self.viewport_height {
            self.viewport_offset = self.cursor.line + 1 - self.viewport_height;
        }
    }

    fn move_to_line(&mut self, line: usize) {
        self.cursor.line = line;
        self.cursor.column = self.cursor.column.min(self.line_len(line));
        self.scroll_to_cursor();
    }

    // Editing

    /// Insert a character at the cursor; `\n` splits the line
    pub fn insert_char(&mut self, c: char) -> bool {
        match c {
            '\n' => self.insert_newline(),
            '\r' => false,
            _ => {
                let at = self.byte_index(self.cursor.line, self.cursor.column);
                self.lines[self.cursor.line].insert(at, c);
                self.cursor.column += 1;
                self.modified = true;
                true
            }
        }
    }

    /// Insert each character of `text` as if typed
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            changed |= self.insert_char(c);
        }
        changed
    }

    /// Split the current line at the cursor
    pub fn insert_newline(&mut self) -> bool {
        let at = self.byte_index(self.cursor.line, self.cursor.column);
        let rest = self.lines[self.cursor.line].split_off(at);
        self.lines.insert(self.cursor.line + 1, rest);

        self.cursor.line += 1;
        self.cursor.column = 0;
        self.modified = true;
        self.scroll_to_cursor();
        true
    }

    /// Delete the character before the cursor, or join with the previous line
    pub fn backspace(&mut self) -> bool {
        if self.cursor.column > 0 {
            let at = self.byte_index(self.cursor.line, self.cursor.column - 1);
            self.lines[self.cursor.line].remove(at);
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            let current = self.lines.remove(self.cursor.line);
            self.cursor.line -= 1;
            self.cursor.column = self.line_len(self.cursor.line);
            self.lines[self.cursor.line].push_str(&current);
            self.scroll_to_cursor();
        } else {
            return false;
        }

        self.modified = true;
        true
    }

    /// Delete the character under the cursor, or join the next line
    pub fn delete_forward(&mut self) -> bool {
        let line = self.cursor.line;
        if self.cursor.column < self.line_len(line) {
            let at = self.byte_index(line, self.cursor.column);
            self.lines[line].remove(at);
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].push_str(&next);
        } else {
            return false;
        }

        self.modified = true;
        true
    }

    // Movement

    /// One character left, wrapping to the end of the previous line
    pub fn move_left(&mut self) -> bool {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.line_len(self.cursor.line);
            self.scroll_to_cursor();
        } else {
            return false;
        }
        true
    }

    /// One character right, wrapping to the start of the next line
    pub fn move_right(&mut self) -> bool {
        if self.cursor.column < self.line_len(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.column = 0;
            self.scroll_to_cursor();
        } else {
            return false;
        }
        true
    }

    pub fn move_up(&mut self) -> bool {
        if self.cursor.line == 0 {
            return false;
        }
        self.move_to_line(self.cursor.line - 1);
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor.line + 1 >= self.lines.len() {
            return false;
        }
        self.move_to_line(self.cursor.line + 1);
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor.column != 0;
        self.cursor.column = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let end = self.line_len(self.cursor.line);
        let moved = self.cursor.column != end;
        self.cursor.column = end;
        moved
    }

    pub fn page_up(&mut self) -> bool {
        if self.cursor.line == 0 {
            return false;
        }
        self.move_to_line(self.cursor.line.saturating_sub(self.viewport_height));
        true
    }

    pub fn page_down(&mut self) -> bool {
        let last = self.lines.len() - 1;
        if self.cursor.line == last {
            return false;
        }
        self.move_to_line((self.cursor.line + self.viewport_height).min(last));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(buffer: &TextBuffer) {
        let cursor = buffer.cursor();
        assert!(!buffer.lines().is_empty());
        assert!(cursor.line < buffer.line_count());
        assert!(cursor.column <= buffer.lines()[cursor.line].chars().count());
        assert!(buffer.viewport_offset() <= cursor.line);
        assert!(cursor.line < buffer.viewport_offset() + buffer.viewport_height());
    }

    #[test]
    fn test_typing_scenario() {
        let mut buffer = TextBuffer::new("", 10);
        buffer.insert_str("hi");
        buffer.insert_newline();
        buffer.insert_str("bye");

        assert_eq!(buffer.lines(), &["hi".to_string(), "bye".to_string()]);
        assert_eq!(buffer.cursor(), Cursor::new(1, 3));
        assert!(buffer.is_modified());
        assert_invariants(&buffer);
    }

    #[test]
    fn test_new_from_text() {
        let buffer = TextBuffer::new("a\r\nb\n", 0);
        assert_eq!(buffer.lines(), &["a", "b", ""]);
        assert_eq!(buffer.viewport_height(), 1);
        assert!(!buffer.is_modified());
        assert_eq!(buffer.text(), "a\nb\n");
    }

    #[test]
    fn test_insert_in_middle_of_line() {
        let mut buffer = TextBuffer::new("hllo", 5);
        buffer.move_right();
        buffer.insert_char('e');
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_newline_splits_line() {
        let mut buffer = TextBuffer::new("headtail", 5);
        for _ in 0..4 {
            buffer.move_right();
        }
        buffer.insert_newline();
        assert_eq!(buffer.lines(), &["head", "tail"]);
        assert_eq!(buffer.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_backspace_merges_lines() {
        let mut buffer = TextBuffer::new("abc\ndef", 5);
        buffer.move_down();
        assert!(buffer.backspace());
        assert_eq!(buffer.lines(), &["abcdef"]);
        assert_eq!(buffer.cursor(), Cursor::new(0, 3));
        assert_invariants(&buffer);
    }

    #[test]
    fn test_backspace_deletes_previous_char() {
        let mut buffer = TextBuffer::new("abc", 5);
        buffer.move_end();
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "ab");
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut buffer = TextBuffer::new("abc\ndef", 5);
        assert!(!buffer.backspace());
        assert_eq!(buffer.text(), "abc\ndef");
        assert!(!buffer.is_modified());
        assert_eq!(buffer.cursor(), Cursor::new(0, 0));
    }

    #[test]
    fn test_delete_forward_merges_next_line() {
        let mut buffer = TextBuffer::new("abc\ndef", 5);
        buffer.move_end();
        assert!(buffer.delete_forward());
        assert_eq!(buffer.lines(), &["abcdef"]);
        assert_eq!(buffer.cursor(), Cursor::new(0, 3));
    }

    #[test]
    fn test_delete_forward_removes_char_under_cursor() {
        let mut buffer = TextBuffer::new("abc", 5);
        assert!(buffer.delete_forward());
        assert_eq!(buffer.text(), "bc");
        assert_eq!(buffer.cursor(), Cursor::new(0, 0));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buffer = TextBuffer::new("abc\ndef", 5);
        buffer.move_down();
        buffer.move_end();
        assert!(!buffer.delete_forward());
        assert_eq!(buffer.text(), "abc\ndef");
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut buffer = TextBuffer::new("long line\nab\nanother long", 5);
        buffer.move_end();
        buffer.move_down();
        assert_eq!(buffer.cursor(), Cursor::new(1, 2));
        buffer.move_down();
        assert_eq!(buffer.cursor(), Cursor::new(2, 2));
        assert!(!buffer.move_down());
    }

    #[test]
    fn test_horizontal_movement_wraps() {
        let mut buffer = TextBuffer::new("ab\ncd", 5);
        assert!(!buffer.move_left());
        buffer.move_end();
        buffer.move_right();
        assert_eq!(buffer.cursor(), Cursor::new(1, 0));
        buffer.move_left();
        assert_eq!(buffer.cursor(), Cursor::new(0, 2));
        buffer.move_down();
        buffer.move_end();
        assert!(!buffer.move_right());
    }

    #[test]
    fn test_multibyte_characters() {
        let mut buffer = TextBuffer::new("héllo", 5);
        buffer.move_right();
        buffer.move_right();
        buffer.insert_char('✓');
        assert_eq!(buffer.text(), "hé✓llo");
        buffer.backspace();
        buffer.backspace();
        assert_eq!(buffer.text(), "hllo");
        assert_eq!(buffer.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_viewport_follows_cursor_down_and_up() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut buffer = TextBuffer::new(&text, 5);

        for _ in 0..7 {
            buffer.move_down();
            assert_invariants(&buffer);
        }
        assert_eq!(buffer.cursor().line, 7);
        assert_eq!(buffer.viewport_offset(), 3);
        assert_eq!(buffer.cursor_screen_row(), 4);
        assert_eq!(buffer.visible_lines(), &["3", "4", "5", "6", "7"]);

        for _ in 0..6 {
            buffer.move_up();
            assert_invariants(&buffer);
        }
        assert_eq!(buffer.cursor().line, 1);
        assert_eq!(buffer.viewport_offset(), 1);
    }

    #[test]
    fn test_viewport_follows_newlines_and_merges() {
        let mut buffer = TextBuffer::new("", 3);
        for _ in 0..5 {
            buffer.insert_newline();
            assert_invariants(&buffer);
        }
        assert_eq!(buffer.viewport_offset(), 3);

        for _ in 0..5 {
            buffer.backspace();
            assert_invariants(&buffer);
        }
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.viewport_offset(), 0);
    }

    #[test]
    fn test_paging() {
        let text = (0..30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut buffer = TextBuffer::new(&text, 10);

        buffer.page_down();
        assert_eq!(buffer.cursor().line, 10);
        buffer.page_down();
        buffer.page_down();
        assert_eq!(buffer.cursor().line, 29);
        assert!(!buffer.page_down());
        assert_invariants(&buffer);

        buffer.page_up();
        assert_eq!(buffer.cursor().line, 19);
        assert_invariants(&buffer);
    }

    #[test]
    fn test_resize_viewport_keeps_cursor_visible() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut buffer = TextBuffer::new(&text, 10);
        buffer.page_down();
        buffer.set_viewport_height(2);
        assert_invariants(&buffer);
        assert_eq!(buffer.viewport_offset(), 8);
    }

    #[test]
    fn test_counts() {
        let buffer = TextBuffer::new("one two\n\nthree", 5);
        assert_eq!(buffer.word_count(), 3);
        assert_eq!(buffer.char_count(), "one two\n\nthree".chars().count());
    }

    #[test]
    fn test_mark_saved() {
        let mut buffer = TextBuffer::new("", 5);
        buffer.insert_char('x');
        buffer.mark_saved();
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_invariants_hold_for_mixed_sequence() {
        let mut buffer = TextBuffer::new("alpha\nbe\n\ngamma delta", 2);
        let ops: Vec<fn(&mut TextBuffer) -> bool> = vec![
            TextBuffer::move_end,
            TextBuffer::move_down,
            TextBuffer::delete_forward,
            TextBuffer::move_down,
            TextBuffer::backspace,
            TextBuffer::insert_newline,
            TextBuffer::page_down,
            TextBuffer::move_right,
            TextBuffer::backspace,
            TextBuffer::page_up,
            TextBuffer::move_left,
            TextBuffer::delete_forward,
            TextBuffer::move_home,
            TextBuffer::backspace,
        ];

        for op in ops {
            op(&mut buffer);
            assert_invariants(&buffer);
        }
    }
}
