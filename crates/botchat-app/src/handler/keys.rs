//! Key event handlers for each view

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, SessionState};

/// Convert key events to messages based on the current view
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Global bindings
    match key {
        InputKey::CharCtrl('c') | InputKey::Esc => return Some(Message::Quit),
        InputKey::CharCtrl('t') => return Some(Message::ToggleTheme),
        _ => {}
    }

    match &state.session {
        SessionState::Loading { .. } => None,
        SessionState::BotNotFound { .. } => handle_key_bot_not_found(key),
        SessionState::AwaitingCredential { form, .. } => match key {
            InputKey::Enter => Some(Message::SubmitCredential {
                username: form.username.clone(),
                api_key: form.api_key.clone(),
            }),
            _ => handle_key_login(key),
        },
        SessionState::Active { chat, .. } => match key {
            InputKey::Enter => Some(Message::SendMessage {
                text: chat.input.clone(),
            }),
            _ => handle_key_chat(key),
        },
    }
}

fn handle_key_bot_not_found(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_login(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab | InputKey::Down => Some(Message::FormNextField),
        InputKey::BackTab | InputKey::Up => Some(Message::FormPrevField),
        InputKey::Backspace => Some(Message::FormBackspace),
        InputKey::CharCtrl('u') => Some(Message::FormClearField),
        InputKey::Char(c) => Some(Message::FormInput(c)),
        _ => None,
    }
}

fn handle_key_chat(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('o') => Some(Message::Logout),
        InputKey::CharCtrl('u') => Some(Message::ComposerClear),
        InputKey::Backspace => Some(Message::ComposerBackspace),
        InputKey::Char(c) => Some(Message::ComposerInput(c)),

        InputKey::Up => Some(Message::ScrollUp),
        InputKey::Down => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::End => Some(Message::ScrollToBottom),
        _ => None,
    }
}
