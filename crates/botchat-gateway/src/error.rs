//! Structured gateway failures
//!
//! Every failure the backend can produce is folded into a single
//! [`GatewayError`] so the session logic never has to look at raw HTTP
//! shapes or error strings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Matches the backend's upstream rejection text, e.g.
/// "Invalid Google Gemini API Key"
static INVALID_API_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)invalid\b.*\bapi key").expect("Invalid api key classifier regex")
});

/// Category of a gateway failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    /// Bot lookup returned non-2xx
    NotFound,
    /// Registration rejected by the backend
    Registration,
    /// Message send rejected by the backend
    Send,
    /// The upstream provider rejected the api key
    InvalidCredential,
    /// Transport-level failure (DNS, connect, timeout)
    Network,
    /// A 2xx response whose body could not be understood
    Decode,
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "not_found",
            Self::Registration => "registration",
            Self::Send => "send",
            Self::InvalidCredential => "invalid_credential",
            Self::Network => "network",
            Self::Decode => "decode",
        };
        f.write_str(s)
    }
}

/// A classified backend failure carrying a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::NotFound, message)
    }

    pub fn registration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Registration, message)
    }

    pub fn send(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Send, message)
    }

    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidCredential, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Decode, message)
    }

    /// Build an error for a rejected request, upgrading it to
    /// `InvalidCredential` when the status or text says the key was refused.
    ///
    /// `fallback` kind is used otherwise.
    pub fn classify(fallback: GatewayErrorKind, status: Option<u16>, message: &str) -> Self {
        let kind = if is_credential_rejection(status, message) {
            GatewayErrorKind::InvalidCredential
        } else {
            fallback
        };
        Self::new(kind, message)
    }

    pub fn is_invalid_credential(&self) -> bool {
        self.kind == GatewayErrorKind::InvalidCredential
    }
}

/// Whether a failed response means the api key itself was refused
pub fn is_credential_rejection(status: Option<u16>, message: &str) -> bool {
    matches!(status, Some(401) | Some(403)) || INVALID_API_KEY_REGEX.is_match(message)
}
