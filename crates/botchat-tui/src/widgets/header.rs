//! Header bar widget
//!
//! Shows the app title, the bot being chatted with and the signed-in user
//! with a hint of their api key.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{styles, Palette};

const APP_TITLE: &str = "botchat";

/// Main header: status dot, title, bot name and (when signed in) the user
pub struct MainHeader<'a> {
    bot_label: &'a str,
    username: Option<&'a str>,
    key_hint: Option<&'a str>,
    online: bool,
    palette: &'a Palette,
}

impl<'a> MainHeader<'a> {
    /// `bot_label` is the bot name once known, else the requested id
    pub fn new(bot_label: &'a str, palette: &'a Palette) -> Self {
        Self {
            bot_label,
            username: None,
            key_hint: None,
            online: false,
            palette,
        }
    }

    /// Mark the bot as loaded (green status dot)
    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    pub fn with_user(mut self, username: Option<&'a str>) -> Self {
        self.username = username;
        self
    }

    /// Masked api key shown after the username, e.g. `••••y123`
    pub fn with_key_hint(mut self, key_hint: Option<&'a str>) -> Self {
        self.key_hint = key_hint;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let block = styles::glass_block(p, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let dot_style = Style::default().fg(if self.online {
            p.success
        } else {
            p.text_muted
        });
        let left = Line::from(vec![
            Span::raw(" "),
            Span::styled(if self.online { "●" } else { "○" }, dot_style),
            Span::raw(" "),
            Span::styled(APP_TITLE, styles::accent_bold(p)),
            Span::styled(" / ", styles::text_muted(p)),
            Span::styled(self.bot_label, styles::text_secondary(p)),
        ]);
        let left_width = left.width() as u16;
        buf.set_line(inner.x, inner.y, &left, inner.width);

        // User info right-aligned. The key hint goes first when space is
        // short, then the username.
        let Some(username) = self.username else {
            return;
        };
        let fits = |width: u16| left_width + width + 1 <= inner.width;

        let user = Span::styled(username, styles::text_primary(p));
        let mut right = Line::from(vec![user.clone(), Span::raw(" ")]);
        if let Some(hint) = self.key_hint {
            let full = Line::from(vec![
                user,
                Span::styled(" · API Key: ", styles::text_muted(p)),
                Span::styled(hint, styles::text_secondary(p)),
                Span::raw(" "),
            ]);
            if fits(full.width() as u16) {
                right = full;
            }
        }

        let width = right.width() as u16;
        if fits(width) {
            let x = inner.x + inner.width - width;
            buf.set_line(x, inner.y, &right, width);
        }
    }
}
