//! Conversation transcript
//!
//! Messages are laid out as a label line followed by the content wrapped to
//! the inner width. The view is anchored to the bottom; `scroll` counts lines
//! from the bottom and is clamped here, so the state never needs to know the
//! rendered height.

use botchat_core::{ChatMessage, Role};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::theme::{styles, Palette};

const ERROR_PREFIX: &str = "**Error:**";

pub struct Transcript<'a> {
    messages: &'a [ChatMessage],
    history_loaded: bool,
    is_sending: bool,
    scroll: usize,
    palette: &'a Palette,
}

impl<'a> Transcript<'a> {
    pub fn new(messages: &'a [ChatMessage], palette: &'a Palette) -> Self {
        Self {
            messages,
            history_loaded: true,
            is_sending: false,
            scroll: 0,
            palette,
        }
    }

    pub fn history_loaded(mut self, loaded: bool) -> Self {
        self.history_loaded = loaded;
        self
    }

    pub fn sending(mut self, sending: bool) -> Self {
        self.is_sending = sending;
        self
    }

    pub fn scroll(mut self, lines_from_bottom: usize) -> Self {
        self.scroll = lines_from_bottom;
        self
    }

    fn build_lines(&self, width: usize) -> Vec<Line<'a>> {
        let p = self.palette;
        let mut lines = Vec::new();

        for message in self.messages {
            let is_error =
                message.role == Role::Assistant && message.content.starts_with(ERROR_PREFIX);
            let content_style = if is_error {
                styles::error(p)
            } else {
                styles::text_primary(p)
            };

            lines.push(Line::from(Span::styled(
                message.role.label(),
                styles::role_label(p, message.role),
            )));
            for raw in message.content.lines() {
                for chunk in wrap_line(raw, width) {
                    lines.push(Line::from(Span::styled(chunk, content_style)));
                }
            }
            lines.push(Line::default());
        }

        if self.is_sending {
            lines.push(Line::from(Span::styled(
                "Bot is typing…",
                styles::text_muted(p).add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

impl Widget for Transcript<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let block = styles::glass_block(p, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if !self.history_loaded {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "Loading conversation…",
                styles::text_muted(p),
            );
            return;
        }

        let lines = self.build_lines(inner.width as usize);
        let height = inner.height as usize;
        let max_scroll = lines.len().saturating_sub(height);
        let scroll = self.scroll.min(max_scroll);
        let start = lines.len().saturating_sub(height + scroll);
        let visible: Vec<Line> = lines.into_iter().skip(start).take(height).collect();

        Paragraph::new(visible)
            .style(Style::default().bg(p.card))
            .render(inner, buf);

        if scroll > 0 {
            let hint = format!(" ↓ {} more ", scroll);
            let x = inner.x + inner.width.saturating_sub(hint.chars().count() as u16);
            buf.set_string(x, area.y + area.height - 1, hint, styles::keybinding(p));
        }
    }
}

/// Split `text` into chunks at most `width` display columns wide,
/// preferring to break after whitespace
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    // Byte offset in `current` just after the last whitespace
    let mut last_break: Option<usize> = None;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            if c.is_whitespace() {
                out.push(current.trim_end().to_string());
                current.clear();
                current_width = 0;
                last_break = None;
                continue;
            }
            let rest = match last_break {
                Some(at) if at < current.len() => current.split_off(at),
                _ => String::new(),
            };
            out.push(current.trim_end().to_string());
            current = rest;
            current_width = current.chars().map(|c| c.width().unwrap_or(0)).sum();
            last_break = None;
        }
        current.push(c);
        current_width += w;
        if c.is_whitespace() {
            last_break = Some(current.len());
        }
    }
    out.push(current.trim_end().to_string());
    out
}
