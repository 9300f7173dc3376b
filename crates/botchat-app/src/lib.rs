//! botchat-app - Session state machine and orchestration for botchat
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the chat
//! session, the Engine abstraction shared by the TUI and headless runners,
//! configuration loading, and the local credential/theme stores.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod message_log;
pub mod process;
pub mod signals;
pub mod state;
pub mod store;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use message_log::MessageLog;
pub use state::{AppState, ChatState, CredentialForm, FormField, SessionState, View};
pub use store::Stores;
