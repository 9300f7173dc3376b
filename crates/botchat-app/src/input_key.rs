//! Terminal-independent key events
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary
//! so the session logic and the headless runner never depend on crossterm.

/// A key press as the session logic sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Printable character (already shifted)
    Char(char),
    /// Character with Ctrl held (Ctrl+c, Ctrl+o, ...)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Action keys
    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// Whether this key inserts text into an input field
    pub fn is_text(&self) -> bool {
        matches!(self, InputKey::Char(_))
    }
}
