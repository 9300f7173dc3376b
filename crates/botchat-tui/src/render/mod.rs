//! Main render/view function (View in TEA pattern)


use botchat_app::{AppState, SessionState};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::layout;
use crate::theme::{styles, Palette};
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`; scroll clamping happens in the widgets.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let palette = Palette::for_mode(state.theme);
    let p = &palette;

    frame.render_widget(Block::default().style(Style::default().bg(p.background)), area);

    let areas = layout::create(area);

    let bot_label = state
        .session
        .bot()
        .map(|bot| bot.name.as_str())
        .unwrap_or_else(|| state.session.bot_id());
    let credential = state.session.credential();
    let key_hint = credential.map(|c| c.key_hint());
    let header = widgets::MainHeader::new(bot_label, p)
        .online(state.session.bot().is_some())
        .with_user(credential.map(|c| c.username.as_str()))
        .with_key_hint(key_hint.as_deref());
    frame.render_widget(header, areas.header);

    match &state.session {
        SessionState::Loading { bot_id } => {
            render_message_box(
                frame,
                areas.body,
                p,
                "Loading",
                vec![Line::from(Span::styled(
                    format!("Looking up bot {}…", bot_id),
                    styles::text_secondary(p),
                ))],
            );
        }
        SessionState::BotNotFound { bot_id, reason } => {
            render_message_box(
                frame,
                areas.body,
                p,
                "Bot not found",
                vec![
                    Line::from(Span::styled(
                        format!("No bot with id {}", bot_id),
                        styles::text_primary(p),
                    )),
                    Line::from(Span::styled(reason.clone(), styles::error(p))),
                    Line::default(),
                    Line::from(Span::styled("Press q to quit", styles::text_muted(p))),
                ],
            );
        }
        SessionState::AwaitingCredential { bot, form } => {
            frame.render_widget(widgets::LoginForm::new(form, &bot.name, p), areas.body);
        }
        SessionState::Active { chat, .. } => {
            let chat_areas = layout::split_chat(areas.body);

            let transcript = widgets::Transcript::new(chat.messages.as_slice(), p)
                .history_loaded(chat.history_loaded)
                .sending(chat.is_sending)
                .scroll(chat.scroll);
            frame.render_widget(transcript, chat_areas.transcript);

            let mut composer = widgets::Composer::new(&chat.input, p);
            if chat.is_sending {
                composer = composer.disabled("Waiting for reply…");
            } else if !chat.history_loaded {
                composer = composer.disabled("Loading conversation…");
            }
            frame.render_widget(composer, chat_areas.composer);
        }
    }

    frame.render_widget(
        widgets::StatusBar::new(state.view(), state.theme, p),
        areas.status,
    );
}

/// Centered bordered box with a title and a few lines of text
fn render_message_box(
    frame: &mut Frame,
    area: Rect,
    p: &Palette,
    title: &str,
    lines: Vec<Line<'_>>,
) {
    let height = lines.len() as u16 + 4;
    let rect = layout::centered(area, 60, height);
    let block = styles::glass_block(p, false).title(Span::styled(
        format!(" {} ", title),
        styles::accent_bold(p),
    ));

    let mut body = vec![Line::default()];
    body.extend(lines);
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rect,
    );
}
