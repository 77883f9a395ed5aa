//! Drawing the form
//!
//! `render` turns the application state into a `Frame`: one styled string
//! per screen row, optional boxes drawn over them and the cursor position.
//! Widths are measured in terminal columns, not chars.

use super::theme::{Theme, RESET};
use crate::input::{Button, KeyAction, Overlay, BATCH_BUTTONS, SELECTION_BUTTONS};
use crate::state::{App, Focus, PhraseStatus};
use crate::APP_TITLE;
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the ID column
const ID_COLUMN: usize = 5;

/// Width of the Status column
const STATUS_COLUMN: usize = 20;

/// Rows used by everything except the input area and table body
const FIXED_ROWS: usize = 8;

/// Smallest input area
const MIN_INPUT_ROWS: usize = 3;

/// A rendered screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Styled rows, top to bottom
    pub lines: Vec<String>,
    /// Styled rows drawn over `lines` at (row, col)
    pub boxes: Vec<(usize, usize, String)>,
    /// Cursor position (row, col), hidden when None
    pub cursor: Option<(usize, usize)>,
}

impl Frame {
    /// Escape sequences that draw this frame over the whole screen
    pub fn to_ansi(&self) -> String {
        let mut out = String::from("\x1b[?25l");
        for (row, line) in self.lines.iter().enumerate() {
            let _ = write!(out, "\x1b[{};1H{}{}\x1b[K", row + 1, line, RESET);
        }
        for (row, col, text) in &self.boxes {
            let _ = write!(out, "\x1b[{};{}H{}{}", row + 1, col + 1, text, RESET);
        }
        if let Some((row, col)) = self.cursor {
            let _ = write!(out, "\x1b[{};{}H\x1b[?25h", row + 1, col + 1);
        }
        out
    }
}

/// Cut `text` to `width` columns and pad it with spaces to exactly that
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Columns `skip..skip + width` of `text`, padded to `width`
fn window(text: &str, skip: usize, width: usize) -> String {
    let mut col = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices() {
        if col >= skip {
            start = i;
            break;
        }
        col += c.width().unwrap_or(0);
    }
    fit(&text[start..], width)
}

/// Break `text` into rows of at most `width` columns
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;
        for word in line.split(' ') {
            let w = word.width();
            if used > 0 && used + 1 + w > width {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            if used > 0 {
                row.push(' ');
                used += 1;
            }
            row.push_str(word);
            used += w;
        }
        rows.push(row);
    }
    rows
}

fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width()) / 2;
    fit(&format!("{}{}", " ".repeat(pad), text), width)
}

fn button_row(buttons: &[Button], theme: &Theme, width: usize, dimmed: bool) -> String {
    let mut out = String::new();
    let mut used = 0;
    for button in buttons {
        let label = format!(" {} {} ", button.key, button.label);
        let w = label.width() + 1;
        if used + w > width {
            break;
        }
        // Clear and Exit stay available while busy
        if dimmed && !matches!(button.action, KeyAction::Clear | KeyAction::Exit) {
            let _ = write!(out, "\x1b[2m{}{} ", label, RESET);
        } else {
            let _ = write!(out, "{}{}{} ", theme.button, label, RESET);
        }
        used += w;
    }
    out
}

/// Draw the whole form into a `cols` x `rows` frame
pub fn render(app: &App, cols: u16, rows: u16) -> Frame {
    let cols = usize::from(cols).max(20);
    let rows = usize::from(rows).max(1);
    let theme = &app.ctx.theme;
    let busy = app.is_busy();

    let spare = rows.saturating_sub(FIXED_ROWS);
    let input_rows = (spare * 2 / 5).max(MIN_INPUT_ROWS);
    let table_rows = spare.saturating_sub(input_rows).max(1);

    let mut frame = Frame::default();
    let lines = &mut frame.lines;

    lines.push(format!("{}{}", theme.title, centered(APP_TITLE, cols)));
    lines.push(format!(
        "{}{}",
        theme.label,
        fit("Enter German phrases (one per line):", cols)
    ));

    // Input area, scrolled to keep the cursor visible
    let input_top = lines.len();
    let (cur_row, _) = app.input.cursor();
    let cur_col = app.input.cursor_display_col();
    let first_line = cur_row.saturating_sub(input_rows - 1);
    let skip = (cur_col + 1).saturating_sub(cols);
    for i in 0..input_rows {
        let text = app
            .input
            .lines()
            .get(first_line + i)
            .map(String::as_str)
            .unwrap_or("");
        lines.push(format!("{}{}", theme.input, window(text, skip, cols)));
    }

    lines.push(button_row(BATCH_BUTTONS, theme, cols, busy));
    lines.push(format!("{}{}", theme.label, "\u{2500}".repeat(cols)));
    lines.push(format!("{}{}", theme.label, fit("Generated Phrases:", cols)));

    let phrase_col = cols.saturating_sub(ID_COLUMN + STATUS_COLUMN + 2);
    lines.push(format!(
        "{}{} {} {}",
        theme.header,
        fit("ID", ID_COLUMN),
        fit("Phrase", phrase_col),
        fit("Status", STATUS_COLUMN)
    ));

    // Table body, scrolled to keep the selection visible
    let first_row = app
        .selected()
        .map(|s| s.saturating_sub(table_rows - 1))
        .unwrap_or(0);
    for i in 0..table_rows {
        let index = first_row + i;
        match app.registry.get(index) {
            Some(record) => {
                let style = if app.selected() == Some(index) {
                    theme.selected
                } else if matches!(record.status, PhraseStatus::Failed(_)) {
                    theme.error
                } else {
                    ""
                };
                lines.push(format!(
                    "{}{} {} {}",
                    style,
                    fit(&record.id.to_string(), ID_COLUMN),
                    fit(&record.display_text(), phrase_col),
                    fit(&record.status.to_string(), STATUS_COLUMN)
                ));
            }
            None => lines.push(String::new()),
        }
    }

    lines.push(button_row(SELECTION_BUTTONS, theme, cols, busy));

    let focus = match app.focus {
        Focus::Input => "[input]",
        Focus::Table => "[table]",
    };
    let status_width = cols.saturating_sub(focus.width() + 1);
    lines.push(format!(
        "{}{} {}",
        theme.status,
        fit(app.status(), status_width),
        focus
    ));

    if app.focus == Focus::Input {
        let row = cur_row - first_line;
        frame.cursor = Some((input_top + row, cur_col - skip));
    }

    if let Some(overlay) = app.handlers.top_overlay() {
        draw_overlay(&mut frame, &overlay, theme, cols, rows);
    }

    frame.lines.truncate(rows);
    if let Some((row, _)) = frame.cursor {
        if row >= rows {
            frame.cursor = None;
        }
    }
    frame
}

/// Draw an alert or prompt box centered on the screen
fn draw_overlay(frame: &mut Frame, overlay: &Overlay, theme: &Theme, cols: usize, rows: usize) {
    let width = cols.saturating_sub(4).clamp(16, 64);
    let inner = width - 4;

    let (title, mut body, footer) = match overlay {
        Overlay::Alert { title, message } => (title, wrap(message, inner), "[Enter] OK"),
        Overlay::Prompt { title, .. } => (title, vec![String::new()], "[Enter] OK  [Esc] Cancel"),
    };
    body.insert(0, String::new());
    body.push(String::new());
    body.push(footer.to_string());

    let height = body.len() + 1;
    let top = rows.saturating_sub(height) / 2;
    let left = cols.saturating_sub(width) / 2;

    frame.boxes.push((
        top,
        left,
        format!("{}\x1b[1m{}", theme.modal, centered(title, width)),
    ));
    for (i, line) in body.iter().enumerate() {
        frame
            .boxes
            .push((top + 1 + i, left, format!("{}  {}  ", theme.modal, fit(line, inner))));
    }

    match overlay {
        Overlay::Prompt { value, .. } => {
            // Show the tail of long values, where typing happens
            let skip = (value.width() + 1).saturating_sub(inner);
            let row = top + 2;
            frame.boxes[2] = (
                row,
                left,
                format!("{}  {}{}{}  ", theme.modal, theme.input, window(value, skip, inner), theme.modal),
            );
            frame.cursor = Some((row, left + 2 + value.width() - skip));
        }
        Overlay::Alert { .. } => frame.cursor = None,
    }
}
