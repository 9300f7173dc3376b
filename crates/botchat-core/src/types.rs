//! Core domain type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A configured chat persona, fetched once per session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Opaque backend identifier (the `botId` path parameter)
    pub id: String,
    /// Display name
    pub name: String,
    /// Greeting shown when a conversation has no history. May be empty.
    pub welcome_message: String,
}

impl Bot {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        welcome_message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            welcome_message: welcome_message.into(),
        }
    }

    /// Welcome text, or `fallback` when the bot has none configured
    pub fn greeting<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.welcome_message.trim().is_empty() {
            fallback
        } else {
            &self.welcome_message
        }
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Bot",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Opaque message identifier, unique within the rendered list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single entry in a conversation
///
/// Content may contain markdown/LaTeX; it is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }

    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::User, content)
    }

    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_greeting_uses_welcome_message() {
        let bot = Bot::new("abc123", "Helper", "Hi!");
        assert_eq!(bot.greeting("fallback"), "Hi!");
    }

    #[test]
    fn test_bot_greeting_falls_back_when_blank() {
        let bot = Bot::new("abc123", "Helper", "   ");
        assert_eq!(bot.greeting("fallback"), "fallback");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"assistant\"").unwrap(),
            Role::Assistant
        );
    }

    #[test]
    fn test_message_id_is_transparent_string() {
        let msg = ChatMessage::user(MessageId::new("local-1"), "hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], "local-1");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle().toggle(), ThemeMode::Light);
        assert!(ThemeMode::default().is_dark());
    }
}
