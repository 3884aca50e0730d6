//! Global keyboard shortcuts
//!
//! Runs before every other key handler. Digits `1`-`6` pick a known theme by
//! position; Escape toggles the theme menu and is consumed.

use crate::theme::KnownTheme;
use crossterm::event::KeyCode;

/// Action bound to a global shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ApplyTheme(KnownTheme),
    ToggleMenu,
}

impl Shortcut {
    /// Whether later handlers must not see the key
    pub fn consumes_key(&self) -> bool {
        matches!(self, Shortcut::ToggleMenu)
    }
}

/// Map a key to its shortcut, `None` for keys the dispatcher ignores
pub fn dispatch(code: KeyCode) -> Option<Shortcut> {
    match code {
        KeyCode::Esc => Some(Shortcut::ToggleMenu),
        KeyCode::Char(c) => KnownTheme::from_digit(c).map(Shortcut::ApplyTheme),
        _ => None,
    }
}
