//! Backend wire format
//!
//! Request bodies and the tolerant decoders for the four endpoints. Field
//! names follow the backend's camelCase JSON.

use botchat_core::{Bot, ChatMessage, MessageId, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::GatewayError;

/// Fallback reason when a rejected registration carries no `error` field
pub const REGISTER_FAILED: &str = "Failed to register user";

/// Fallback reason when a rejected send carries no `error` field
pub const SEND_FAILED: &str = "Failed to send message";

/// Reason used for bot lookup failures
pub const BOT_NOT_FOUND: &str = "Failed to fetch bot";

/// `GET /bots/{botId}` response
#[derive(Debug, Deserialize)]
struct BotPayload {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "welcomeMessage", default)]
    welcome_message: Option<String>,
}

/// `POST /chat/user` body
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
}

/// `POST /chat` body
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    #[serde(rename = "botId")]
    pub bot_id: &'a str,
    pub message: &'a str,
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Decode a bot lookup response body
pub fn decode_bot(body: &str) -> Result<Bot, GatewayError> {
    let payload: BotPayload = serde_json::from_str(body)
        .map_err(|e| GatewayError::not_found(format!("{}: {}", BOT_NOT_FOUND, e)))?;

    Ok(Bot::new(
        payload.id,
        payload.name,
        payload.welcome_message.unwrap_or_default(),
    ))
}

/// Decode a history response body
///
/// Entries that are not objects or carry an unknown role are skipped. A body
/// that is not a JSON array decodes to an empty history. Ids are passed
/// through as-is (numbers are stringified); uniqueness is the caller's job.
pub fn decode_history(body: &str) -> Vec<ChatMessage> {
    let entries = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            debug!("History body is not an array: {}", type_name(&other));
            return Vec::new();
        }
        Err(e) => {
            debug!("History body is not JSON: {}", e);
            return Vec::new();
        }
    };

    entries.iter().filter_map(decode_history_entry).collect()
}

fn decode_history_entry(entry: &Value) -> Option<ChatMessage> {
    let obj = entry.as_object()?;

    let role = match obj.get("role").and_then(Value::as_str)? {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        other => {
            debug!("Skipping history entry with role {:?}", other);
            return None;
        }
    };

    let content = obj
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let id = match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    Some(ChatMessage::new(MessageId::new(id), role, content))
}

/// Decode a successful send response into the assistant's reply text
pub fn decode_reply(body: &str) -> Result<String, GatewayError> {
    let response: SendResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::decode(format!("Malformed reply from server: {}", e)))?;

    response
        .content
        .ok_or_else(|| GatewayError::decode("Reply from server had no content"))
}

/// Extract the `error` text from a rejected response, if the body has one
pub fn decode_error_text(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
