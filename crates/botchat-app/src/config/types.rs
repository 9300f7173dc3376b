//! Configuration types for botchat
//!
//! Defines:
//! - `Settings` - Application settings (`config.toml`)
//! - `BackendSettings`, `ChatSettings`, `StorageSettings` - its sections

use std::path::PathBuf;
use std::time::Duration;

use botchat_gateway::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};

/// Greeting shown when a bot has no welcome message configured
pub const DEFAULT_FALLBACK_GREETING: &str = "Hello! How can I help you today?";

/// Application settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub chat: ChatSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

/// `[backend]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Base URL of the chat backend API (including the `/api` prefix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `[chat]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatSettings {
    /// Greeting used when the bot's welcome message is empty
    #[serde(default = "default_fallback_greeting")]
    pub fallback_greeting: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            fallback_greeting: default_fallback_greeting(),
        }
    }
}

/// `[storage]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory for `credentials.toml` and `preferences.toml`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_fallback_greeting() -> String {
    DEFAULT_FALLBACK_GREETING.to_string()
}
