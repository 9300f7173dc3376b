//! Main update function - handles state transitions (TEA pattern)

use botchat_core::prelude::*;

use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::state::AppState;

use super::{composer, keys::handle_key, session, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        Message::Start => session::handle_start(state),

        Message::ToggleTheme => {
            let mode = state.theme.toggle();
            state.theme = mode;
            if let Err(e) = state.stores.theme.save(mode) {
                warn!("Failed to persist theme preference: {}", e);
            }
            state.emit(EngineEvent::ThemeChanged { mode });
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Bot Lookup
        // ─────────────────────────────────────────────────────────
        Message::BotLoaded { epoch, bot_id, bot } => {
            session::handle_bot_loaded(state, epoch, &bot_id, bot)
        }
        Message::BotLoadFailed {
            epoch,
            bot_id,
            error,
        } => session::handle_bot_load_failed(state, epoch, &bot_id, error),

        // ─────────────────────────────────────────────────────────
        // Credential Form
        // ─────────────────────────────────────────────────────────
        Message::FormInput(c) => session::handle_form_input(state, c),
        Message::FormBackspace => session::handle_form_backspace(state),
        Message::FormClearField => session::handle_form_clear_field(state),
        Message::FormNextField => session::handle_form_focus(state, true),
        Message::FormPrevField => session::handle_form_focus(state, false),
        Message::SubmitCredential { username, api_key } => {
            session::handle_submit_credential(state, &username, &api_key)
        }

        // ─────────────────────────────────────────────────────────
        // Registration / History
        // ─────────────────────────────────────────────────────────
        Message::RegisterSucceeded { epoch, credential } => {
            session::handle_register_succeeded(state, epoch, credential)
        }
        Message::RegisterFailed { epoch, error } => {
            session::handle_register_failed(state, epoch, error)
        }
        Message::HistoryLoaded { epoch, messages } => {
            session::handle_history_loaded(state, epoch, messages)
        }
        Message::HistoryFailed { epoch, error } => {
            session::handle_history_failed(state, epoch, error)
        }

        // ─────────────────────────────────────────────────────────
        // Composer / Dispatch
        // ─────────────────────────────────────────────────────────
        Message::ComposerInput(c) => composer::handle_input(state, c),
        Message::ComposerBackspace => composer::handle_backspace(state),
        Message::ComposerClear => composer::handle_clear(state),
        Message::SendMessage { text } => composer::handle_send(state, &text),
        Message::ReplyReceived { epoch, content } => {
            composer::handle_reply_received(state, epoch, content)
        }
        Message::SendFailed { epoch, error } => composer::handle_send_failed(state, epoch, error),

        // ─────────────────────────────────────────────────────────
        // Credential Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::Logout => session::handle_logout(state, None),
        Message::ForceLogout => {
            session::handle_logout(state, Some(session::INVALID_KEY_NOTICE.to_string()))
        }

        // ─────────────────────────────────────────────────────────
        // Scroll Messages
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp => composer::handle_scroll(state, 1),
        Message::ScrollDown => composer::handle_scroll(state, -1),
        Message::PageUp => composer::handle_scroll(state, composer::PAGE_LINES),
        Message::PageDown => composer::handle_scroll(state, -composer::PAGE_LINES),
        Message::ScrollToBottom => composer::handle_scroll_to_bottom(state),
    }
}
