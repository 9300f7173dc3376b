//! Message types for the application (TEA pattern)
//!
//! Results of async work carry the `epoch` they were issued under so stale
//! results can be recognised and dropped.

use botchat_core::{Bot, ChatMessage, Credential};
use botchat_gateway::GatewayError;

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from the terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Begin the session (issues the bot lookup)
    Start,

    /// Quit now (Ctrl+C, Esc, signal handler)
    Quit,

    /// Flip between light and dark
    ToggleTheme,

    // ─────────────────────────────────────────────────────────
    // Bot Lookup
    // ─────────────────────────────────────────────────────────
    BotLoaded {
        epoch: u64,
        bot_id: String,
        bot: Bot,
    },
    BotLoadFailed {
        epoch: u64,
        bot_id: String,
        error: GatewayError,
    },

    // ─────────────────────────────────────────────────────────
    // Credential Form
    // ─────────────────────────────────────────────────────────
    /// Insert a character into the focused form field
    FormInput(char),
    /// Delete the last character of the focused form field
    FormBackspace,
    /// Clear the focused form field
    FormClearField,
    FormNextField,
    FormPrevField,
    /// Validate and register a credential
    SubmitCredential { username: String, api_key: String },

    // ─────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────
    RegisterSucceeded {
        epoch: u64,
        credential: Credential,
    },
    RegisterFailed {
        epoch: u64,
        error: GatewayError,
    },

    // ─────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────
    HistoryLoaded {
        epoch: u64,
        messages: Vec<ChatMessage>,
    },
    HistoryFailed {
        epoch: u64,
        error: GatewayError,
    },

    // ─────────────────────────────────────────────────────────
    // Composer / Dispatch
    // ─────────────────────────────────────────────────────────
    ComposerInput(char),
    ComposerBackspace,
    ComposerClear,
    /// Send `text` as a user message
    SendMessage { text: String },
    ReplyReceived {
        epoch: u64,
        content: String,
    },
    SendFailed {
        epoch: u64,
        error: GatewayError,
    },

    // ─────────────────────────────────────────────────────────
    // Credential Lifecycle
    // ─────────────────────────────────────────────────────────
    /// User-initiated logout
    Logout,
    /// Logout after the backend rejected the api key
    ForceLogout,

    // ─────────────────────────────────────────────────────────
    // Scroll Messages
    // ─────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToBottom,
}
