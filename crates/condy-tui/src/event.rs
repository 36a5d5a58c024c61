//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`, `j`, `↓`         | `FocusNext` / `Nav(Down)`  |
//! | `Shift+Tab`, `k`, `↑`   | `FocusPrev` / `Nav(Up)`    |
//! | `i`                     | `Insert`                   |
//! | `s`                     | `Submit`                   |
//! | `?`                     | `Help`                     |
//! | `Ctrl+x`                | `Clear`                    |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While a form field is being edited the event loop calls
//! [`to_app_event_insert`] instead. In insert mode:
//! - letters that are shortcuts in normal mode (`q`, `i`, `s`, `j`, `k`, `?`)
//!   produce `Char` events
//! - arrow keys produce `Nav` so `←`/`→` move the text cursor and `↑`/`↓`
//!   move the dropdown highlight
//! - only `Ctrl+c`, `Ctrl+x`, `Escape`, `Enter`, `Tab`, and `Backspace` keep
//!   their special bindings

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for field and dropdown navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next form field.
    FocusNext,
    /// Move keyboard focus to the previous form field.
    FocusPrev,
    /// Start editing the focused field.
    Insert,
    /// Validate and submit the access request.
    Submit,
    /// Toggle the help popup.
    Help,
    /// The trailing "clear" action of the focused field.
    Clear,
    /// Arrow-key navigation.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm: pick the highlighted match, or submit.
    Enter,
    /// Leave insert mode / close the help popup.
    Escape,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no semantic meaning for the
/// application (mouse events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('x') if key.modifiers == Mod::CONTROL => Some(AppEvent::Clear),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),
        Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::FocusPrev),
        Down => Some(AppEvent::FocusNext),
        Up => Some(AppEvent::FocusPrev),

        Char('i') if key.modifiers == Mod::NONE => Some(AppEvent::Insert),
        Char('s') if key.modifiers == Mod::NONE => Some(AppEvent::Submit),
        // '?' arrives with or without SHIFT depending on the terminal
        Char('?') => Some(AppEvent::Help),

        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('x') if key.modifiers == Mod::CONTROL => Some(AppEvent::Clear),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn field_cycling() {
        assert_eq!(to_app_event(press(KeyCode::Tab)), Some(AppEvent::FocusNext));
        assert_eq!(to_app_event(press(KeyCode::Char('j'))), Some(AppEvent::FocusNext));
        assert_eq!(to_app_event(press(KeyCode::Char('k'))), Some(AppEvent::FocusPrev));
        assert_eq!(
            to_app_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(AppEvent::FocusPrev)
        );
    }

    #[test]
    fn normal_mode_commands() {
        assert_eq!(to_app_event(press(KeyCode::Char('i'))), Some(AppEvent::Insert));
        assert_eq!(to_app_event(press(KeyCode::Char('s'))), Some(AppEvent::Submit));
        assert_eq!(
            to_app_event(key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(AppEvent::Help)
        );
    }

    #[test]
    fn clear_in_both_modes() {
        assert_eq!(to_app_event(ctrl(KeyCode::Char('x'))), Some(AppEvent::Clear));
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('x'))), Some(AppEvent::Clear));
    }

    #[test]
    fn resize_event() {
        assert_eq!(
            to_app_event(Event::Resize(120, 40)),
            Some(AppEvent::Resize(120, 40))
        );
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }

    // ── Insert mode ────────────────────────────────────────────────────────

    #[test]
    fn insert_mode_shortcut_letters_are_chars() {
        for ch in ['q', 'i', 's', 'j', 'k', '?'] {
            let ev = press(KeyCode::Char(ch));
            assert_eq!(
                to_app_event_insert(ev),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char"
            );
        }
    }

    #[test]
    fn insert_mode_arrows_are_nav() {
        assert_eq!(
            to_app_event_insert(press(KeyCode::Down)),
            Some(AppEvent::Nav(Direction::Down))
        );
        assert_eq!(
            to_app_event_insert(press(KeyCode::Left)),
            Some(AppEvent::Nav(Direction::Left))
        );
    }

    #[test]
    fn insert_mode_ctrl_c_still_quits() {
        assert_eq!(
            to_app_event_insert(ctrl(KeyCode::Char('c'))),
            Some(AppEvent::Quit)
        );
    }
}
