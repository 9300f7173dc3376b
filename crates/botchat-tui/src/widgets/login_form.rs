//! Credential form shown while awaiting a login

use botchat_app::{CredentialForm, FormField};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::layout;
use crate::theme::{styles, Palette};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 12;
const MASK: char = '•';
const CURSOR: &str = "▏";

pub struct LoginForm<'a> {
    form: &'a CredentialForm,
    bot_name: &'a str,
    palette: &'a Palette,
}

impl<'a> LoginForm<'a> {
    pub fn new(form: &'a CredentialForm, bot_name: &'a str, palette: &'a Palette) -> Self {
        Self {
            form,
            bot_name,
            palette,
        }
    }

    fn field_line(&self, field: FormField, value: String) -> Line<'a> {
        let p = self.palette;
        let focused = self.form.focus == field && !self.form.is_registering;
        let marker = if focused { "› " } else { "  " };
        let value_style = if focused {
            Style::default().fg(p.text_primary)
        } else {
            styles::text_secondary(p)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(p.accent)),
            Span::styled(value, value_style),
        ];
        if focused {
            spans.push(Span::styled(CURSOR, Style::default().fg(p.accent)));
        }
        Line::from(spans)
    }

    fn label(&self, text: &'static str, field: FormField) -> Line<'a> {
        let style = if self.form.focus == field {
            styles::accent_bold(self.palette)
        } else {
            styles::text_muted(self.palette).add_modifier(Modifier::BOLD)
        };
        Line::from(Span::styled(text, style))
    }
}

impl Widget for LoginForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let rect = layout::centered(area, FORM_WIDTH, FORM_HEIGHT);
        let block = styles::glass_block(p, true).title(Span::styled(
            format!(" Sign in to chat with {} ", self.bot_name),
            styles::accent_bold(p),
        ));

        let masked: String = std::iter::repeat(MASK)
            .take(self.form.api_key.chars().count())
            .collect();

        let status = if self.form.is_registering {
            Line::from(Span::styled("Signing in…", Style::default().fg(p.warning)))
        } else if let Some(notice) = &self.form.notice {
            Line::from(Span::styled(notice.clone(), styles::error(p)))
        } else {
            Line::from(Span::styled(
                "Your API key is stored locally on this machine.",
                styles::text_muted(p),
            ))
        };

        let lines = vec![
            Line::default(),
            self.label(" Username", FormField::Username),
            self.field_line(FormField::Username, self.form.username.clone()),
            Line::default(),
            self.label(" API key", FormField::ApiKey),
            self.field_line(FormField::ApiKey, masked),
            Line::default(),
            status,
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(rect, buf);
    }
}
