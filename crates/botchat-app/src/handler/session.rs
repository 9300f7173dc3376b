//! Session lifecycle handlers
//!
//! Bot lookup, the credential form, registration, history seeding and
//! logout. Results of async actions are checked against the current epoch
//! and view before they are applied.

use botchat_core::prelude::*;
use botchat_core::{Bot, ChatMessage, Credential};
use botchat_gateway::GatewayError;

use crate::engine_event::EngineEvent;
use crate::state::{AppState, ChatState, CredentialForm, SessionState};

use super::{UpdateAction, UpdateResult};

/// Login form notice after the backend refused the api key mid-chat
pub const INVALID_KEY_NOTICE: &str = "Invalid API key. Please check it and try again.";

/// Prefix for registration failures shown on the form
pub const LOGIN_FAILED_PREFIX: &str = "Login failed: ";

/// Whether a result issued under `epoch` still applies
fn is_current(state: &AppState, epoch: u64, what: &str) -> bool {
    if epoch != state.epoch {
        debug!(
            "Dropping stale {} (epoch {} != {})",
            what, epoch, state.epoch
        );
        return false;
    }
    true
}

pub fn handle_start(state: &mut AppState) -> UpdateResult {
    match &state.session {
        SessionState::Loading { bot_id } => {
            info!("Looking up bot {}", bot_id);
            UpdateResult::action(UpdateAction::FetchBot {
                epoch: state.epoch,
                bot_id: bot_id.clone(),
            })
        }
        other => {
            debug!("Start ignored in {} view", other.view());
            UpdateResult::none()
        }
    }
}

pub fn handle_bot_loaded(
    state: &mut AppState,
    epoch: u64,
    bot_id: &str,
    bot: Bot,
) -> UpdateResult {
    if !is_current(state, epoch, "bot lookup") {
        return UpdateResult::none();
    }
    match &state.session {
        SessionState::Loading { bot_id: current } if current == bot_id => {}
        _ => {
            debug!("Dropping bot lookup result for {}", bot_id);
            return UpdateResult::none();
        }
    }

    info!("Loaded bot {} ({})", bot.name, bot.id);

    if let Some(credential) = state.stores.credentials.load() {
        match credential.validate() {
            Ok(()) => {
                info!("Restoring stored credential for {}", credential.username);
                return enter_active(state, bot, credential);
            }
            Err(e) => {
                warn!("Stored credential is invalid ({}), clearing it", e);
                if let Err(e) = state.stores.credentials.clear() {
                    warn!("Failed to clear stored credential: {}", e);
                }
            }
        }
    }

    state.transition(SessionState::AwaitingCredential {
        bot,
        form: CredentialForm::new(),
    });
    UpdateResult::none()
}

pub fn handle_bot_load_failed(
    state: &mut AppState,
    epoch: u64,
    bot_id: &str,
    error: GatewayError,
) -> UpdateResult {
    if !is_current(state, epoch, "bot lookup failure") {
        return UpdateResult::none();
    }
    if !matches!(&state.session, SessionState::Loading { bot_id: current } if current == bot_id) {
        debug!("Dropping bot lookup failure for {}", bot_id);
        return UpdateResult::none();
    }

    warn!("Bot {} not available: {} ({})", bot_id, error.message, error.kind);
    state.transition(SessionState::BotNotFound {
        bot_id: bot_id.to_string(),
        reason: error.message,
    });
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Credential Form
// ─────────────────────────────────────────────────────────

pub fn handle_form_input(state: &mut AppState, c: char) -> UpdateResult {
    if c.is_control() {
        return UpdateResult::none();
    }
    if let Some(form) = state.session.form_mut() {
        form.focused_mut().push(c);
    }
    UpdateResult::none()
}

pub fn handle_form_backspace(state: &mut AppState) -> UpdateResult {
    if let Some(form) = state.session.form_mut() {
        form.focused_mut().pop();
    }
    UpdateResult::none()
}

pub fn handle_form_clear_field(state: &mut AppState) -> UpdateResult {
    if let Some(form) = state.session.form_mut() {
        form.focused_mut().clear();
    }
    UpdateResult::none()
}

pub fn handle_form_focus(state: &mut AppState, forward: bool) -> UpdateResult {
    if let Some(form) = state.session.form_mut() {
        form.focus = if forward {
            form.focus.next()
        } else {
            form.focus.prev()
        };
    }
    UpdateResult::none()
}

/// Validate locally, then issue registration. Refused while one is in flight.
pub fn handle_submit_credential(
    state: &mut AppState,
    username: &str,
    api_key: &str,
) -> UpdateResult {
    let epoch = state.epoch;
    let validation = Credential::new(username, api_key);

    let Some(form) = state.session.form_mut() else {
        debug!("Credential submitted outside the login view, ignoring");
        return UpdateResult::none();
    };
    if form.is_registering {
        debug!("Registration already in flight, refusing resubmission");
        return UpdateResult::none();
    }

    form.username = username.to_string();
    form.api_key = api_key.to_string();

    match validation {
        Err(e) => {
            let text = e.to_string();
            form.notice = Some(text.clone());
            debug!("Credential rejected locally: {}", text);
            state.emit(EngineEvent::NoticeRaised { text });
            UpdateResult::none()
        }
        Ok(credential) => {
            form.is_registering = true;
            form.notice = None;
            info!("Registering user {}", credential.username);
            UpdateResult::action(UpdateAction::RegisterUser { epoch, credential })
        }
    }
}

pub fn handle_register_succeeded(
    state: &mut AppState,
    epoch: u64,
    credential: Credential,
) -> UpdateResult {
    if !is_current(state, epoch, "registration") {
        return UpdateResult::none();
    }
    let bot = match &state.session {
        SessionState::AwaitingCredential { bot, form } if form.is_registering => bot.clone(),
        _ => {
            debug!("Dropping registration result outside a pending login");
            return UpdateResult::none();
        }
    };

    if let Err(e) = state.stores.credentials.save(&credential) {
        warn!("Failed to persist credential: {}", e);
    }

    enter_active(state, bot, credential)
}

pub fn handle_register_failed(
    state: &mut AppState,
    epoch: u64,
    error: GatewayError,
) -> UpdateResult {
    if !is_current(state, epoch, "registration failure") {
        return UpdateResult::none();
    }
    let Some(form) = state.session.form_mut() else {
        return UpdateResult::none();
    };

    let text = format!("{}{}", LOGIN_FAILED_PREFIX, error.message);
    warn!("Registration failed ({}): {}", error.kind, error.message);
    form.is_registering = false;
    form.notice = Some(text.clone());
    state.emit(EngineEvent::NoticeRaised { text });
    UpdateResult::none()
}

/// Enter the chat view and start loading history
fn enter_active(state: &mut AppState, bot: Bot, credential: Credential) -> UpdateResult {
    let action = UpdateAction::FetchHistory {
        epoch: state.epoch,
        bot_id: bot.id.clone(),
        api_key: credential.api_key.clone(),
    };
    let username = credential.username.clone();

    state.transition(SessionState::Active {
        bot,
        credential,
        chat: ChatState::new(),
    });
    state.emit(EngineEvent::LoggedIn { username });
    UpdateResult::action(action)
}

// ─────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────

/// Seed the transcript from history, or with the greeting when there is none
pub fn handle_history_loaded(
    state: &mut AppState,
    epoch: u64,
    messages: Vec<ChatMessage>,
) -> UpdateResult {
    if !is_current(state, epoch, "history") {
        return UpdateResult::none();
    }
    let greeting = match &state.session {
        SessionState::Active { bot, .. } => state.greeting_for(bot),
        _ => return UpdateResult::none(),
    };
    let Some(chat) = state.session.chat_mut() else {
        return UpdateResult::none();
    };
    if chat.history_loaded {
        debug!("History already loaded, ignoring");
        return UpdateResult::none();
    }

    let count = if messages.is_empty() {
        chat.messages.seed_welcome(greeting);
        chat.messages.len()
    } else {
        chat.messages.replace_with_history(messages)
    };
    chat.history_loaded = true;
    chat.scroll = 0;

    debug!("Conversation seeded with {} message(s)", count);
    state.emit(EngineEvent::MessagesReplaced { count });
    UpdateResult::none()
}

/// History failures are never surfaced; they seed the greeting instead
pub fn handle_history_failed(
    state: &mut AppState,
    epoch: u64,
    error: GatewayError,
) -> UpdateResult {
    warn!("History fetch failed, treating as empty: {}", error);
    handle_history_loaded(state, epoch, Vec::new())
}

// ─────────────────────────────────────────────────────────
// Logout
// ─────────────────────────────────────────────────────────

/// Clear the credential and return to the login form
///
/// `notice` is set when the logout was forced by the backend. In the login
/// view this only re-clears the store.
pub fn handle_logout(state: &mut AppState, notice: Option<String>) -> UpdateResult {
    let forced = notice.is_some();

    if let Err(e) = state.stores.credentials.clear() {
        warn!("Failed to clear stored credential: {}", e);
    }

    let bot = match &state.session {
        SessionState::Active { bot, .. } => bot.clone(),
        SessionState::AwaitingCredential { .. } => {
            debug!("Logout while awaiting credential: store re-cleared");
            return UpdateResult::none();
        }
        other => {
            debug!("Logout ignored in {} view", other.view());
            return UpdateResult::none();
        }
    };

    let epoch = state.bump_epoch();
    info!("Logged out (forced: {}), now at epoch {}", forced, epoch);

    let form = match &notice {
        Some(text) => CredentialForm::with_notice(text.clone()),
        None => CredentialForm::new(),
    };
    state.emit(EngineEvent::LoggedOut { forced });
    state.transition(SessionState::AwaitingCredential { bot, form });
    if let Some(text) = notice {
        state.emit(EngineEvent::NoticeRaised { text });
    }
    UpdateResult::none()
}
