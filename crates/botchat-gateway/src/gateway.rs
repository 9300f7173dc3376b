//! The backend operations the chat session depends on

use botchat_core::{Bot, ChatMessage};

use crate::error::GatewayError;

/// Remote chat backend
///
/// Implemented over HTTP by [`crate::HttpGateway`]; tests use the scripted
/// in-memory gateway behind the `test-helpers` feature.
#[trait_variant::make(BackendGateway: Send)]
pub trait LocalBackendGateway {
    /// Look up a bot by id. Any failure is a `NotFound` (or `Network`).
    async fn get_bot(&self, bot_id: &str) -> Result<Bot, GatewayError>;

    /// Register (or re-register) a user with their api key
    async fn register_user(&self, username: &str, api_key: &str) -> Result<(), GatewayError>;

    /// Fetch prior conversation for this bot and key.
    ///
    /// Returns an empty list when the backend has no history or the request
    /// fails for any reason.
    async fn fetch_chat_history(
        &self,
        bot_id: &str,
        api_key: &str,
    ) -> Result<Vec<ChatMessage>, GatewayError>;

    /// Send a user message and return the assistant's reply text
    async fn send_message(
        &self,
        bot_id: &str,
        message: &str,
        api_key: &str,
    ) -> Result<String, GatewayError>;
}
