//! Color palettes for the dark and light themes

use botchat_core::ThemeMode;
use ratatui::style::Color;

/// Colors used by every widget. One instance per [`ThemeMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    // --- Background layers ---
    pub background: Color,
    pub card: Color,

    // --- Borders ---
    pub border_dim: Color,
    pub border_active: Color,

    // --- Accent ---
    pub accent: Color,

    // --- Text ---
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // --- Roles ---
    pub user: Color,
    pub assistant: Color,

    // --- Status ---
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(10, 12, 16),
    card: Color::Rgb(18, 21, 28),
    border_dim: Color::Rgb(45, 51, 59),
    border_active: Color::Rgb(88, 166, 255),
    accent: Color::Rgb(88, 166, 255),
    text_primary: Color::Rgb(201, 209, 217),
    text_secondary: Color::Rgb(125, 133, 144),
    text_muted: Color::Rgb(72, 79, 88),
    user: Color::Rgb(129, 140, 248),
    assistant: Color::Rgb(16, 185, 129),
    error: Color::Rgb(244, 63, 94),
    warning: Color::Rgb(234, 179, 8),
    success: Color::Rgb(16, 185, 129),
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 252),
    card: Color::Rgb(255, 255, 255),
    border_dim: Color::Rgb(208, 215, 222),
    border_active: Color::Rgb(9, 105, 218),
    accent: Color::Rgb(9, 105, 218),
    text_primary: Color::Rgb(31, 35, 40),
    text_secondary: Color::Rgb(87, 96, 106),
    text_muted: Color::Rgb(140, 149, 159),
    user: Color::Rgb(79, 70, 229),
    assistant: Color::Rgb(4, 120, 87),
    error: Color::Rgb(207, 34, 46),
    warning: Color::Rgb(154, 103, 0),
    success: Color::Rgb(26, 127, 55),
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }
}
