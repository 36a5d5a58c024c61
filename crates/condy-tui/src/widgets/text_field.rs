//! Single-line text field with a label, an error line, and a trailing clear
//! action.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//! - `Clear` empties the field.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Trailing action glyph drawn at the right edge of a non-empty field.
pub const CLEAR_GLYPH: &str = "✕";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct TextFieldState {
    pub value: String,
    /// Byte offset of the cursor within `value`.
    pub cursor: usize,
    pub error: Option<String>,
}

impl TextFieldState {
    /// Replace the value and park the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Apply an editing event. Returns `true` if the value changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.value.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace => match prev_boundary(&self.value, self.cursor) {
                Some(prev) => {
                    self.value.remove(prev);
                    self.cursor = prev;
                    true
                }
                None => false,
            },
            AppEvent::Nav(Direction::Left) => {
                if let Some(prev) = prev_boundary(&self.value, self.cursor) {
                    self.cursor = prev;
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = next_boundary(&self.value, self.cursor);
                false
            }
            AppEvent::Clear => {
                let changed = !self.value.is_empty();
                self.value.clear();
                self.cursor = 0;
                changed
            }
            _ => false,
        }
    }
}

/// Byte offset of the char boundary before `cursor`, if any.
pub(crate) fn prev_boundary(s: &str, cursor: usize) -> Option<usize> {
    if cursor == 0 {
        return None;
    }
    s[..cursor].char_indices().last().map(|(i, _)| i)
}

/// Byte offset of the char boundary after `cursor`, clamped to the end.
pub(crate) fn next_boundary(s: &str, cursor: usize) -> usize {
    s[cursor..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| cursor + i)
        .unwrap_or(s.len())
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// How a field is drawn relative to keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Unfocused,
    Focused,
    Editing,
}

impl FieldMode {
    pub fn new(focused: bool, editing: bool) -> Self {
        match (focused, editing) {
            (false, _) => FieldMode::Unfocused,
            (true, false) => FieldMode::Focused,
            (true, true) => FieldMode::Editing,
        }
    }
}

/// Bordered field block shared by the text field and the selector field:
/// label in the top border, error message in the bottom border.
pub(crate) fn field_block<'a>(
    label: &'a str,
    error: Option<&'a str>,
    mode: FieldMode,
    theme: &Theme,
) -> Block<'a> {
    let border_style = match mode {
        FieldMode::Unfocused => theme.border_unfocused,
        FieldMode::Focused => theme.border_focused,
        FieldMode::Editing => theme.border_editing,
    };
    let mut block = Block::bordered()
        .title(format!(" {label} "))
        .border_style(border_style);
    if let Some(err) = error {
        block = block.title_bottom(Line::from(Span::styled(format!(" {err} "), theme.status_error)));
    }
    block
}

pub struct TextField<'a> {
    state: &'a TextFieldState,
    label: &'a str,
    hint: &'a str,
    mode: FieldMode,
    theme: &'a Theme,
}

impl<'a> TextField<'a> {
    pub fn new(state: &'a TextFieldState, label: &'a str, mode: FieldMode, theme: &'a Theme) -> Self {
        Self {
            state,
            label,
            hint: "",
            mode,
            theme,
        }
    }

    /// Dim text shown while the field is empty.
    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = hint;
        self
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.value[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = field_block(self.label, self.state.error.as_deref(), self.mode, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.value.is_empty() {
            Line::from(Span::styled(self.hint, self.theme.status_hint))
        } else {
            Line::from(self.state.value.as_str())
        };
        Paragraph::new(line).render(inner, buf);

        if !self.state.value.is_empty() && inner.width > 0 {
            buf.set_string(inner.right() - 1, inner.y, CLEAR_GLYPH, self.theme.status_hint);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
