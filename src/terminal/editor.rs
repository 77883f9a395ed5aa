//! Multi-line text input
//!
//! Holds the phrases the user types, one per line. The cursor column is
//! counted in characters, not bytes, so umlauts and ß edit correctly.

use unicode_width::UnicodeWidthChar;

/// Editable block of text with a cursor
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }

    /// Whole contents, lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the contents and put the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert_str(text);
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as (line, character column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Display width of the text left of the cursor
    pub fn cursor_display_col(&self) -> usize {
        self.lines[self.row]
            .chars()
            .take(self.col)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        if c.is_control() {
            return;
        }
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    /// Insert text at the cursor; `\n` starts new lines
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Split the current line at the cursor
    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Delete left of the cursor, joining lines at column 0
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    /// Delete under the cursor, joining the next line at the end
    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col);
            line.remove(at);
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
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self) {
        self.col = self.line_len(self.row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_newlines() {
        let mut area = TextArea::new();
        area.insert_str("Hallo\nWie geht's?");
        assert_eq!(area.text(), "Hallo\nWie geht's?");
        assert_eq!(area.cursor(), (1, 11));
    }

    #[test]
    fn test_umlauts_edit_by_char() {
        let mut area = TextArea::new();
        area.insert_str("Grüße");
        area.move_left();
        area.backspace();
        assert_eq!(area.text(), "Grüe");
        area.home();
        area.delete();
        assert_eq!(area.text(), "rüe");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut area = TextArea::new();
        area.insert_str("eins\nzwei");
        area.home();
        area.backspace();
        assert_eq!(area.text(), "einszwei");
        assert_eq!(area.cursor(), (0, 4));
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut area = TextArea::new();
        area.insert_str("a\nb");
        area.move_up();
        area.end();
        area.delete();
        assert_eq!(area.text(), "ab");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut area = TextArea::new();
        area.insert_str("lange Zeile\nkurz");
        area.move_up();
        area.end();
        area.move_down();
        assert_eq!(area.cursor(), (1, 4));
    }

    #[test]
    fn test_clear_and_empty() {
        let mut area = TextArea::new();
        assert!(area.is_empty());
        area.set_text("x\ny");
        assert!(!area.is_empty());
        area.clear();
        assert!(area.is_empty());
        assert_eq!(area.lines().len(), 1);
    }

    #[test]
    fn test_display_col_counts_wide_chars() {
        let mut area = TextArea::new();
        area.insert_str("日本");
        assert_eq!(area.cursor_display_col(), 4);
    }
}
