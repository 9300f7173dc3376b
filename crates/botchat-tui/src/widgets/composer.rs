//! Single-line message composer

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{styles, Palette};

const PROMPT: &str = " > ";
const CURSOR: &str = "▏";

pub struct Composer<'a> {
    input: &'a str,
    enabled: bool,
    placeholder: &'a str,
    palette: &'a Palette,
}

impl<'a> Composer<'a> {
    pub fn new(input: &'a str, palette: &'a Palette) -> Self {
        Self {
            input,
            enabled: true,
            placeholder: "Type a message…",
            palette,
        }
    }

    /// Disable with a reason shown in place of the placeholder
    pub fn disabled(mut self, reason: &'a str) -> Self {
        self.enabled = false;
        self.placeholder = reason;
        self
    }
}

impl Widget for Composer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let block = styles::glass_block(p, self.enabled);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![Span::styled(PROMPT, Style::default().fg(p.accent))];
        if self.input.is_empty() || !self.enabled {
            spans.push(Span::styled(self.placeholder, styles::text_muted(p)));
        } else {
            // Keep the tail visible when the input is wider than the box
            let room = (inner.width as usize).saturating_sub(PROMPT.len() + 1);
            spans.push(Span::styled(tail(self.input, room), styles::text_primary(p)));
        }
        if self.enabled {
            spans.push(Span::styled(CURSOR, Style::default().fg(p.accent)));
        }

        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
    }
}

/// Longest suffix of `s` at most `max_width` columns wide
fn tail(s: &str, max_width: usize) -> &str {
    if s.width() <= max_width {
        return s;
    }
    let mut start = s.len();
    let mut width = 0;
    for (i, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = i;
    }
    &s[start..]
}
