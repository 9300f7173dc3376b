//! Application state (Model in TEA pattern)

use std::fmt;

use botchat_core::{Bot, Credential, ThemeMode};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message_log::MessageLog;
use crate::store::Stores;

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Which screen the session is on. Payload-free mirror of [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Loading,
    BotNotFound,
    Login,
    Chat,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Loading => "loading",
            View::BotNotFound => "bot_not_found",
            View::Login => "login",
            View::Chat => "chat",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input field on the credential form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Username,
    ApiKey,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Username => FormField::ApiKey,
            FormField::ApiKey => FormField::Username,
        }
    }

    /// Two fields, so previous and next coincide
    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Login form shown while awaiting a credential
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialForm {
    pub username: String,
    pub api_key: String,
    pub focus: FormField,
    /// A registration request is in flight; resubmission is refused
    pub is_registering: bool,
    /// Validation or gateway message shown under the form
    pub notice: Option<String>,
}

impl CredentialForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty form carrying a notice
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Username => &mut self.username,
            FormField::ApiKey => &mut self.api_key,
        }
    }
}

/// Conversation state while the session is active
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub messages: MessageLog,
    /// Composer input buffer
    pub input: String,
    /// A send is in flight; further sends are refused
    pub is_sending: bool,
    /// History fetch has completed (successfully or not)
    pub history_loaded: bool,
    /// Transcript scroll offset in lines from the bottom
    pub scroll: usize,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The session state machine
///
/// Exactly one variant is current. Bot, credential and messages only exist
/// where they are meaningful.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Initial state; the bot lookup is in flight
    Loading { bot_id: String },

    /// Bot lookup failed. Terminal for this session.
    BotNotFound { bot_id: String, reason: String },

    /// Bot known, no accepted credential yet
    AwaitingCredential { bot: Bot, form: CredentialForm },

    /// Credential accepted; chatting
    Active {
        bot: Bot,
        credential: Credential,
        chat: ChatState,
    },
}

impl SessionState {
    pub fn view(&self) -> View {
        match self {
            SessionState::Loading { .. } => View::Loading,
            SessionState::BotNotFound { .. } => View::BotNotFound,
            SessionState::AwaitingCredential { .. } => View::Login,
            SessionState::Active { .. } => View::Chat,
        }
    }

    pub fn bot(&self) -> Option<&Bot> {
        match self {
            SessionState::AwaitingCredential { bot, .. } | SessionState::Active { bot, .. } => {
                Some(bot)
            }
            _ => None,
        }
    }

    pub fn bot_id(&self) -> &str {
        match self {
            SessionState::Loading { bot_id } | SessionState::BotNotFound { bot_id, .. } => bot_id,
            SessionState::AwaitingCredential { bot, .. } | SessionState::Active { bot, .. } => {
                &bot.id
            }
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            SessionState::Active { credential, .. } => Some(credential),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&ChatState> {
        match self {
            SessionState::Active { chat, .. } => Some(chat),
            _ => None,
        }
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatState> {
        match self {
            SessionState::Active { chat, .. } => Some(chat),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&CredentialForm> {
        match self {
            SessionState::AwaitingCredential { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut CredentialForm> {
        match self {
            SessionState::AwaitingCredential { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.chat().is_some_and(|c| c.is_sending)
    }
}

/// Complete application state (the Model)
#[derive(Debug)]
pub struct AppState {
    pub session: SessionState,

    pub theme: ThemeMode,

    pub settings: Settings,

    pub stores: Stores,

    pub phase: AppPhase,

    /// Session generation. Async results tagged with an older epoch are
    /// discarded. Bumped on logout and shutdown.
    pub epoch: u64,

    /// Events recorded by handlers, drained by the engine after each cycle
    events: Vec<EngineEvent>,
}

impl AppState {
    /// Initial state for `bot_id`; theme is read from the store
    pub fn new(bot_id: impl Into<String>, settings: Settings, stores: Stores) -> Self {
        let theme = stores.theme.load();
        Self {
            session: SessionState::Loading {
                bot_id: bot_id.into(),
            },
            theme,
            settings,
            stores,
            phase: AppPhase::Running,
            epoch: 0,
            events: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.session.view()
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Replace the session state, recording a view change if there is one
    pub fn transition(&mut self, next: SessionState) {
        let from = self.session.view();
        let to = next.view();
        self.session = next;
        if from != to {
            self.emit(EngineEvent::ViewChanged { from, to });
        }
    }

    /// Invalidate every in-flight request
    pub fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub fn emit(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    /// Take the events recorded since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Greeting for an empty conversation with `bot`
    pub fn greeting_for(&self, bot: &Bot) -> String {
        bot.greeting(&self.settings.chat.fallback_greeting).to_string()
    }
}
