//! Domain events emitted by the Engine for external consumers
//!
//! Handlers record events on [`crate::AppState`] as they mutate it; the
//! engine broadcasts them in recording order after each message cycle.
//! The headless runner turns them into NDJSON.

use botchat_core::{ChatMessage, ThemeMode};

use crate::state::View;

/// Observable state changes, in the order they happened
#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Session Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The session moved to a different screen
    ViewChanged { from: View, to: View },

    /// A credential was accepted (fresh login or restored from storage)
    LoggedIn { username: String },

    /// The credential was dropped. `forced` when the backend rejected it.
    LoggedOut { forced: bool },

    /// A notice was shown on the login form (validation or gateway error)
    NoticeRaised { text: String },

    // ─────────────────────────────────────────────────────────
    // Conversation
    // ─────────────────────────────────────────────────────────
    /// One message was appended to the transcript
    MessageAppended { message: ChatMessage },

    /// The transcript was replaced wholesale (history load)
    MessagesReplaced { count: usize },

    /// The in-flight send flag changed
    SendingChanged { sending: bool },

    // ─────────────────────────────────────────────────────────
    // Presentation
    // ─────────────────────────────────────────────────────────
    ThemeChanged { mode: ThemeMode },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Short label for this event type (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ViewChanged { .. } => "view_changed",
            Self::LoggedIn { .. } => "logged_in",
            Self::LoggedOut { .. } => "logged_out",
            Self::NoticeRaised { .. } => "notice_raised",
            Self::MessageAppended { .. } => "message_appended",
            Self::MessagesReplaced { .. } => "messages_replaced",
            Self::SendingChanged { .. } => "sending_changed",
            Self::ThemeChanged { .. } => "theme_changed",
            Self::Shutdown => "shutdown",
        }
    }
}
