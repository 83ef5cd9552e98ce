//! Single text field with a cursor and a character limit

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Editable text with a byte-indexed cursor that always sits on a char boundary
#[derive(Clone, Debug, PartialEq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    char_limit: usize,
}

impl TextInput {
    pub fn new(char_limit: usize) -> Self {
        TextInput {
            value: String::new(),
            cursor: 0,
            char_limit,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the content (truncated to the limit) and move the cursor to the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.char_limit).collect();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert at the cursor; ignored once the limit is reached
    pub fn insert(&mut self, c: char) {
        if self.value.chars().count() >= self.char_limit {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Move to the same display column on the previous line, or stay on the first
    pub fn move_up(&mut self) {
        let line_start = self.line_start();
        if line_start == 0 {
            return;
        }
        let col = self.value[line_start..self.cursor].width();
        let prev_start = self.value[..line_start - 1]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.cursor = self.offset_at_column(prev_start, col);
    }

    /// Move to the same display column on the next line, or stay on the last
    pub fn move_down(&mut self) {
        let Some(newline) = self.value[self.cursor..].find('\n') else {
            return;
        };
        let col = self.value[self.line_start()..self.cursor].width();
        self.cursor = self.offset_at_column(self.cursor + newline + 1, col);
    }

    /// Cursor position as (line, display column) for drawing
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, before[line_start..].width())
    }

    fn line_start(&self) -> usize {
        self.value[..self.cursor].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// Byte offset of display column `col` on the line starting at `line_start`,
    /// clamped to the end of that line
    fn offset_at_column(&self, line_start: usize, col: usize) -> usize {
        let mut width = 0;
        for (i, c) in self.value[line_start..].char_indices() {
            if c == '\n' || width >= col {
                return line_start + i;
            }
            width += c.width().unwrap_or(0);
        }
        self.value.len()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_move() {
        let mut input = TextInput::new(10);
        input.insert_str("héllo");
        input.move_left();
        input.move_left();
        input.insert('X');
        assert_eq!(input.value(), "hélXlo");
        assert_eq!(input.cursor_position(), (0, 4));

        input.home();
        input.delete();
        input.end();
        input.backspace();
        assert_eq!(input.value(), "élXl");
    }

    #[test]
    fn test_char_limit() {
        let mut input = TextInput::new(3);
        input.insert_str("abcdef");
        assert_eq!(input.value(), "abc");

        input.set_value("wxyz");
        assert_eq!(input.value(), "wxy");
    }

    #[test]
    fn test_edges_are_safe() {
        let mut input = TextInput::new(5);
        input.backspace();
        input.move_left();
        input.delete();
        input.move_right();
        assert!(input.is_empty());
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let mut input = TextInput::new(50);
        input.insert_str("abcdef\nxy\nlonger line");
        input.move_up();
        assert_eq!(input.cursor_position(), (1, 2));
        input.move_up();
        assert_eq!(input.cursor_position(), (0, 2));
        input.move_down();
        input.move_down();
        assert_eq!(input.cursor_position(), (2, 2));
        input.move_down();
        assert_eq!(input.cursor_position(), (2, 2));

        input.home();
        input.move_up();
        assert_eq!(input.cursor_position(), (0, 0));
        input.move_up();
        assert_eq!(input.cursor_position(), (0, 0));
    }

    #[test]
    fn test_vertical_moves_on_single_line_do_nothing() {
        let mut input = TextInput::new(10);
        input.insert_str("héllo");
        input.move_left();
        input.move_up();
        input.move_down();
        assert_eq!(input.cursor_position(), (0, 4));
    }

    #[test]
    fn test_multiline_cursor_position() {
        let mut input = TextInput::new(50);
        input.insert_str("{\n  \"a\"");
        assert_eq!(input.cursor_position(), (1, 5));
    }
}
