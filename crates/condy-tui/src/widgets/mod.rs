//! Ratatui widgets for the condy TUI.

pub mod help;
pub mod selector;
pub mod status_bar;
pub mod text_field;
