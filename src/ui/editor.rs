//! Multi-line source editor for the input form

use std::borrow::Cow;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

/// Line buffer with a char-indexed cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    /// Cursor column in chars, not bytes
    col: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Terminal columns between line start and the cursor
    pub fn cursor_display_col(&self) -> usize {
        let line = &self.lines[self.row];
        line[..byte_index(line, self.col)]
            .chars()
            .map(|c| match c {
                '\t' => TAB_WIDTH,
                c => c.width().unwrap_or(0),
            })
            .sum()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Replace the buffer, cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert_str(text);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Tabs are kept as typed; [`Editor::indent`] is what the Tab key does
    pub fn insert_char(&mut self, c: char) {
        match c {
            '\n' => self.newline(),
            '\r' => {}
            c => self.insert_plain(c),
        }
    }

    /// Soft indent at the cursor
    pub fn indent(&mut self) {
        for _ in 0..TAB_WIDTH {
            self.insert_plain(' ');
        }
    }

    /// Insert pasted text; CRLF collapses to a single newline
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let rest = line.split_off(byte_index(line, self.col));
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let line = &mut self.lines[self.row];
            line.remove(byte_index(line, self.col));
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        let len = char_len(&self.lines[self.row]);
        if self.col < len {
            let line = &mut self.lines[self.row];
            line.remove(byte_index(line, self.col));
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < char_len(&self.lines[self.row]) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(char_len(&self.lines[self.row]));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(char_len(&self.lines[self.row]));
        }
    }

    pub fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self) {
        self.col = char_len(&self.lines[self.row]);
    }

    fn insert_plain(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        line.insert(byte_index(line, self.col), c);
        self.col += 1;
    }
}

/// A buffer line as the terminal should draw it
pub fn display_line(line: &str) -> Cow<'_, str> {
    if line.contains('\t') {
        Cow::Owned(line.replace('\t', &" ".repeat(TAB_WIDTH)))
    } else {
        Cow::Borrowed(line)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_newlines() {
        let mut editor = Editor::new();
        assert!(editor.is_blank());
        editor.insert_str("def f():\n");
        editor.indent();
        editor.insert_str("return 1");
        assert_eq!(editor.text(), "def f():\n    return 1");
        assert_eq!(editor.cursor(), (1, 12));
        assert!(!editor.is_blank());
    }

    #[test]
    fn test_pasted_tabs_are_kept_verbatim() {
        let mut editor = Editor::new();
        editor.insert_str("def f():\n\treturn '\t'");
        assert_eq!(editor.text(), "def f():\n\treturn '\t'");
        assert_eq!(editor.cursor(), (1, 11));
        assert_eq!(editor.cursor_display_col(), 17);
        assert_eq!(display_line("\tx"), "    x");
        assert!(matches!(display_line("x"), Cow::Borrowed("x")));
    }

    #[test]
    fn test_crlf_paste() {
        let mut editor = Editor::new();
        editor.insert_str("a\r\nb\r\n");
        assert_eq!(editor.lines(), &["a", "b", ""]);
    }

    #[test]
    fn test_newline_splits_line_at_cursor() {
        let mut editor = Editor::new();
        editor.insert_str("abcd");
        editor.move_left();
        editor.move_left();
        editor.newline();
        assert_eq!(editor.lines(), &["ab", "cd"]);
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = Editor::new();
        editor.insert_str("ab\ncd");
        editor.home();
        editor.backspace();
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));

        editor.backspace();
        assert_eq!(editor.text(), "acd");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = Editor::new();
        editor.backspace();
        assert_eq!(editor, Editor::new());
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut editor = Editor::new();
        editor.insert_str("ab\ncd");
        editor.move_up();
        editor.end();
        editor.delete();
        assert_eq!(editor.text(), "abcd");
        editor.home();
        editor.delete();
        assert_eq!(editor.text(), "bcd");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut editor = Editor::new();
        editor.insert_str("long line\nx");
        editor.move_up();
        editor.end();
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 1));
    }

    #[test]
    fn test_horizontal_moves_wrap_lines() {
        let mut editor = Editor::new();
        editor.insert_str("a\nb");
        editor.home();
        editor.move_left();
        assert_eq!(editor.cursor(), (0, 1));
        editor.move_right();
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut editor = Editor::new();
        editor.insert_str("héllo");
        editor.move_left();
        editor.move_left();
        editor.move_left();
        editor.backspace();
        assert_eq!(editor.text(), "hllo");
        assert_eq!(editor.cursor_display_col(), 1);
    }

    #[test]
    fn test_wide_chars_display_width() {
        let mut editor = Editor::new();
        editor.insert_str("日本");
        assert_eq!(editor.cursor(), (0, 2));
        assert_eq!(editor.cursor_display_col(), 4);
    }

    #[test]
    fn test_set_text_replaces_buffer() {
        let mut editor = Editor::new();
        editor.insert_str("old");
        editor.set_text("new\ntext");
        assert_eq!(editor.text(), "new\ntext");
        assert_eq!(editor.cursor(), (1, 4));
    }
}
