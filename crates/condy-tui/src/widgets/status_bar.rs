//! Status bar: one line at the bottom of the screen with the editing mode,
//! the last status message, and keybinding hints.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Outcome of the last user action, shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Success(String),
    Error(String),
}

pub struct StatusBar<'a> {
    insert: bool,
    status: Option<&'a Status>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(insert: bool, status: Option<&'a Status>, theme: &'a Theme) -> Self {
        Self { insert, status, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode, mode_style) = if self.insert {
            (" INSERT ", self.theme.border_editing.add_modifier(Modifier::REVERSED))
        } else {
            (" NORMAL ", self.theme.border_focused.add_modifier(Modifier::REVERSED))
        };

        let mut spans = vec![Span::styled(mode, mode_style), Span::raw(" ")];
        match self.status {
            Some(Status::Info(msg)) => spans.push(Span::styled(msg.as_str(), self.theme.status_hint)),
            Some(Status::Success(msg)) => spans.push(Span::styled(msg.as_str(), self.theme.status_success)),
            Some(Status::Error(msg)) => spans.push(Span::styled(msg.as_str(), self.theme.status_error)),
            None => {}
        }
        Line::from(spans).render(area, buf);

        let hint = if self.insert {
            " esc:done  ctrl+x:clear "
        } else {
            " i:edit  s:submit  ?:help  q:quit "
        };
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
