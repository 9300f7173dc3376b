//! Bottom key-hint bar

use botchat_app::View;
use botchat_core::ThemeMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{styles, Palette};

/// Key hints for each view as (key, action) pairs
fn hints(view: View) -> &'static [(&'static str, &'static str)] {
    match view {
        View::Loading => &[("Esc", "quit")],
        View::BotNotFound => &[("q", "quit")],
        View::Login => &[
            ("Tab", "next field"),
            ("Enter", "sign in"),
            ("^T", "theme"),
            ("Esc", "quit"),
        ],
        View::Chat => &[
            ("Enter", "send"),
            ("PgUp/PgDn", "scroll"),
            ("^O", "logout"),
            ("^T", "theme"),
            ("Esc", "quit"),
        ],
    }
}

pub struct StatusBar<'a> {
    view: View,
    theme: ThemeMode,
    palette: &'a Palette,
}

impl<'a> StatusBar<'a> {
    pub fn new(view: View, theme: ThemeMode, palette: &'a Palette) -> Self {
        Self {
            view,
            theme,
            palette,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        buf.set_style(area, Style::default().bg(p.background));
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in hints(self.view).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", styles::text_muted(p)));
            }
            spans.push(Span::styled(*key, styles::keybinding(p)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, styles::text_secondary(p)));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let mode = format!("{} ", self.theme);
        let width = mode.width() as u16;
        if width < area.width {
            buf.set_string(
                area.x + area.width - width,
                area.y,
                mode,
                styles::text_muted(p),
            );
        }
    }
}
