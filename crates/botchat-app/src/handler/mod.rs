//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per view
//! - `session`: Bot lookup, credential form, registration, history, logout
//! - `composer`: Composer editing, send dispatch, replies, transcript scroll

pub(crate) mod composer;
pub(crate) mod keys;
pub(crate) mod session;
pub(crate) mod update;


use botchat_core::Credential;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
///
/// Every action carries the epoch it was issued under; its result message
/// echoes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Look up the bot for this session
    FetchBot { epoch: u64, bot_id: String },

    /// Register the credential with the backend
    RegisterUser { epoch: u64, credential: Credential },

    /// Load prior conversation
    FetchHistory {
        epoch: u64,
        bot_id: String,
        api_key: String,
    },

    /// Forward a user message to the backend
    SendMessage {
        epoch: u64,
        bot_id: String,
        text: String,
        api_key: String,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
