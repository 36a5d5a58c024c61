//! Driver selector field and its dropdown card.
//!
//! [`SelectorFieldState`] wraps a [`Selector`] with a text cursor and turns
//! key events into [`SelectorEvent`]s for the app shell. The field itself is
//! drawn by [`SelectorField`]; the match list or the no-results message is
//! drawn by [`Dropdown`] as an overlay directly below it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::text_field::{field_block, next_boundary, prev_boundary, FieldMode, CLEAR_GLYPH};
use condy_core::{Icon, Selector, SelectorEvent, SelectorState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Glyph drawn before the query for each [`Icon`].
pub fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Car => "◈",
        Icon::Person => "◉",
        Icon::Key => "⚷",
        Icon::None => "",
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SelectorFieldState {
    pub selector: Selector,
    /// Byte offset of the cursor within the query.
    pub cursor: usize,
}

impl SelectorFieldState {
    pub fn new(selector: Selector) -> Self {
        Self { selector, cursor: 0 }
    }

    /// Write `query` back into the field without reopening the dropdown.
    pub fn sync_query(&mut self, query: &str) {
        self.selector.set_query(query);
        self.cursor = query.len();
    }

    /// Apply a key event. Returns the notifications the caller must act on.
    ///
    /// A disabled field ignores everything.
    pub fn handle(&mut self, event: &AppEvent) -> Vec<SelectorEvent> {
        if self.selector.is_disabled() {
            return Vec::new();
        }
        match event {
            AppEvent::Char(c) => {
                let mut query = self.selector.query().to_string();
                query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.edit(query)
            }
            AppEvent::Backspace => {
                let Some(prev) = prev_boundary(self.selector.query(), self.cursor) else {
                    return Vec::new();
                };
                let mut query = self.selector.query().to_string();
                query.remove(prev);
                self.cursor = prev;
                self.edit(query)
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(prev) = prev_boundary(self.selector.query(), self.cursor) {
                    self.cursor = prev;
                }
                Vec::new()
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = next_boundary(self.selector.query(), self.cursor);
                Vec::new()
            }
            AppEvent::Nav(Direction::Up) => {
                self.selector.move_highlight(-1);
                Vec::new()
            }
            AppEvent::Nav(Direction::Down) => {
                self.selector.move_highlight(1);
                Vec::new()
            }
            AppEvent::Enter => self.selector.select_highlighted(),
            AppEvent::Clear => {
                self.cursor = 0;
                self.selector.clear()
            }
            _ => Vec::new(),
        }
    }

    fn edit(&mut self, query: String) -> Vec<SelectorEvent> {
        let state = self.selector.update_query(query.clone());
        tracing::debug!(query = %query, cursor = self.cursor, ?state, "selector field: edited");
        vec![SelectorEvent::QueryChanged(query)]
    }
}

// ---------------------------------------------------------------------------
// Field widget
// ---------------------------------------------------------------------------

pub struct SelectorField<'a> {
    state: &'a SelectorFieldState,
    label: &'a str,
    mode: FieldMode,
    theme: &'a Theme,
}

impl<'a> SelectorField<'a> {
    pub fn new(state: &'a SelectorFieldState, label: &'a str, mode: FieldMode, theme: &'a Theme) -> Self {
        Self {
            state,
            label,
            mode,
            theme,
        }
    }

    fn prefix_width(&self) -> u16 {
        match icon_glyph(self.state.selector.options().icon) {
            "" => 0,
            _ => 2,
        }
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let query = self.state.selector.query();
        let col = query[..self.state.cursor].chars().count() as u16 + self.prefix_width();
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for SelectorField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selector = &self.state.selector;
        let mode = if selector.is_disabled() {
            FieldMode::Unfocused
        } else {
            self.mode
        };
        let block = field_block(self.label, selector.error(), mode, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        let glyph = icon_glyph(selector.options().icon);
        if !glyph.is_empty() {
            spans.push(Span::raw(format!("{glyph} ")));
        }
        if selector.query().is_empty() {
            let hint = format!("type at least {} characters", selector.options().min_query_len);
            spans.push(Span::styled(hint, self.theme.status_hint));
        } else {
            spans.push(Span::raw(selector.query()));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);

        if !selector.query().is_empty() && !selector.is_disabled() && inner.width > 0 {
            buf.set_string(inner.right() - 1, inner.y, CLEAR_GLYPH, self.theme.status_hint);
        }
    }
}

// ---------------------------------------------------------------------------
// Dropdown card
// ---------------------------------------------------------------------------

/// Floating card under the selector field: the match list when the selector
/// is `Open`, the no-results message when it is `Empty`, nothing otherwise.
pub struct Dropdown<'a> {
    selector: &'a Selector,
    theme: &'a Theme,
}

impl<'a> Dropdown<'a> {
    pub fn new(selector: &'a Selector, theme: &'a Theme) -> Self {
        Self { selector, theme }
    }

    /// Number of content rows the card needs in its current state.
    pub fn rows(&self) -> u16 {
        match self.selector.state() {
            SelectorState::Open => self.selector.matches().len() as u16,
            SelectorState::Empty => 1,
            _ => 0,
        }
    }

    /// Area of the card directly below `field`, clipped to `screen`.
    pub fn area(&self, field: Rect, screen: Rect) -> Rect {
        let rows = self.rows();
        if rows == 0 {
            return Rect::default();
        }
        let y = field.bottom();
        let available = screen.bottom().saturating_sub(y);
        Rect {
            x: field.x,
            y,
            width: field.width,
            height: (rows + 2).min(available),
        }
    }

    fn row_line(&self, index: usize) -> Line<'a> {
        let options = self.selector.options();
        let candidate = &self.selector.matches()[index];
        let highlighted = index == self.selector.highlighted();

        let primary_style = if candidate.text(&options.primary_field).is_some() {
            self.theme.match_primary
        } else {
            self.theme.placeholder
        };
        let mut spans = vec![Span::styled(
            format!(" {} ", candidate.display(&options.primary_field, &options.placeholder)),
            primary_style,
        )];
        if let Some(secondary) = options
            .secondary_field
            .as_deref()
            .and_then(|field| candidate.text(field))
        {
            spans.push(Span::styled(format!(" {secondary}"), self.theme.match_secondary));
        }

        let line = Line::from(spans);
        if highlighted {
            line.style(self.theme.match_highlight)
        } else {
            line
        }
    }
}

impl Widget for Dropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let lines: Vec<Line> = match self.selector.state() {
            SelectorState::Open => (0..self.selector.matches().len())
                .map(|i| self.row_line(i))
                .collect(),
            SelectorState::Empty => vec![Line::from(Span::styled(
                format!(" {}", self.selector.options().no_results_text),
                self.theme.no_results,
            ))],
            SelectorState::Idle | SelectorState::Closed => return,
        };

        Clear.render(area, buf);
        let block = Block::bordered().border_style(self.theme.border_dropdown);
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
