//! Message composer and dispatcher handlers

use botchat_core::prelude::*;
use botchat_gateway::GatewayError;

use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::state::{AppState, SessionState};

use super::{UpdateAction, UpdateResult};

/// Reason used when a failed send carries no message
pub const DEFAULT_SEND_ERROR: &str = "An error occurred while contacting the server.";

/// Lines moved by PageUp/PageDown
pub const PAGE_LINES: isize = 10;

/// Transcript content for a failed send
pub fn error_message_content(reason: &str) -> String {
    let reason = reason.trim();
    let reason = if reason.is_empty() {
        DEFAULT_SEND_ERROR
    } else {
        reason
    };
    format!("**Error:** {}", reason)
}

pub fn handle_input(state: &mut AppState, c: char) -> UpdateResult {
    if c.is_control() {
        return UpdateResult::none();
    }
    if let Some(chat) = state.session.chat_mut() {
        chat.input.push(c);
    }
    UpdateResult::none()
}

pub fn handle_backspace(state: &mut AppState) -> UpdateResult {
    if let Some(chat) = state.session.chat_mut() {
        chat.input.pop();
    }
    UpdateResult::none()
}

pub fn handle_clear(state: &mut AppState) -> UpdateResult {
    if let Some(chat) = state.session.chat_mut() {
        chat.input.clear();
    }
    UpdateResult::none()
}

/// Append the user's message and dispatch it
///
/// Refused (no-op) outside the chat view, for blank text, while a send is
/// in flight, or before history has loaded.
pub fn handle_send(state: &mut AppState, text: &str) -> UpdateResult {
    let epoch = state.epoch;
    let SessionState::Active {
        bot,
        credential,
        chat,
    } = &mut state.session
    else {
        debug!("Send ignored: no active chat");
        return UpdateResult::none();
    };

    if text.trim().is_empty() {
        debug!("Send ignored: empty message");
        return UpdateResult::none();
    }
    if chat.is_sending {
        debug!("Send refused: a reply is still pending");
        return UpdateResult::none();
    }
    if !chat.history_loaded {
        debug!("Send refused: conversation still loading");
        return UpdateResult::none();
    }

    let message = chat.messages.push_user(text).clone();
    chat.input.clear();
    chat.is_sending = true;
    chat.scroll = 0;

    let action = UpdateAction::SendMessage {
        epoch,
        bot_id: bot.id.clone(),
        text: text.to_string(),
        api_key: credential.api_key.clone(),
    };

    state.emit(EngineEvent::MessageAppended { message });
    state.emit(EngineEvent::SendingChanged { sending: true });
    UpdateResult::action(action)
}

pub fn handle_reply_received(state: &mut AppState, epoch: u64, content: String) -> UpdateResult {
    if epoch != state.epoch {
        debug!("Dropping stale reply (epoch {} != {})", epoch, state.epoch);
        return UpdateResult::none();
    }
    let Some(chat) = state.session.chat_mut() else {
        return UpdateResult::none();
    };
    if !chat.is_sending {
        debug!("Dropping reply with no send in flight");
        return UpdateResult::none();
    }

    let message = chat.messages.push_assistant(content).clone();
    chat.is_sending = false;
    chat.scroll = 0;

    state.emit(EngineEvent::MessageAppended { message });
    state.emit(EngineEvent::SendingChanged { sending: false });
    UpdateResult::none()
}

/// Record the failure inline; a rejected api key also forces a logout
pub fn handle_send_failed(state: &mut AppState, epoch: u64, error: GatewayError) -> UpdateResult {
    if epoch != state.epoch {
        debug!("Dropping stale send failure (epoch {} != {})", epoch, state.epoch);
        return UpdateResult::none();
    }
    let Some(chat) = state.session.chat_mut() else {
        return UpdateResult::none();
    };
    if !chat.is_sending {
        debug!("Dropping send failure with no send in flight");
        return UpdateResult::none();
    }

    warn!("Send failed ({}): {}", error.kind, error.message);
    let message = chat
        .messages
        .push_assistant(error_message_content(&error.message))
        .clone();
    chat.is_sending = false;
    chat.scroll = 0;

    state.emit(EngineEvent::MessageAppended { message });
    state.emit(EngineEvent::SendingChanged { sending: false });

    if error.is_invalid_credential() {
        warn!("Backend rejected the api key, logging out");
        return UpdateResult::message(Message::ForceLogout);
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Transcript Scroll
// ─────────────────────────────────────────────────────────

/// Scroll the transcript; positive `lines` moves towards older messages.
/// The renderer clamps the upper bound.
pub fn handle_scroll(state: &mut AppState, lines: isize) -> UpdateResult {
    if let Some(chat) = state.session.chat_mut() {
        chat.scroll = chat.scroll.saturating_add_signed(lines);
    }
    UpdateResult::none()
}

pub fn handle_scroll_to_bottom(state: &mut AppState) -> UpdateResult {
    if let Some(chat) = state.session.chat_mut() {
        chat.scroll = 0;
    }
    UpdateResult::none()
}
