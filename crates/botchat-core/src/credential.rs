//! The (username, api key) pair authorizing chat access

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters an api key must have to be accepted
pub const MIN_API_KEY_LEN: usize = 10;

/// Local (pre-network) credential validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Please enter a username")]
    EmptyUsername,

    #[error("Please enter a valid API key (at least {min} characters)")]
    ApiKeyTooShort { min: usize },
}

/// A validated, fully-present credential
///
/// Both fields are trimmed and non-empty; a partial credential is not
/// representable through [`Credential::new`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub api_key: String,
}

impl Credential {
    /// Validate raw form input and build a credential from the trimmed values
    pub fn new(username: &str, api_key: &str) -> Result<Self, CredentialError> {
        let username = username.trim();
        let api_key = api_key.trim();

        if username.is_empty() {
            return Err(CredentialError::EmptyUsername);
        }
        if api_key.chars().count() < MIN_API_KEY_LEN {
            return Err(CredentialError::ApiKeyTooShort {
                min: MIN_API_KEY_LEN,
            });
        }

        Ok(Self {
            username: username.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Re-check a credential that was loaded from storage
    pub fn validate(&self) -> Result<(), CredentialError> {
        Self::new(&self.username, &self.api_key).map(|_| ())
    }

    /// Api key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        let count = self.api_key.chars().count();
        let visible: String = self.api_key.chars().skip(count.saturating_sub(4)).collect();
        format!("{}{}", "*".repeat(count.saturating_sub(4)), visible)
    }

    /// Short fixed-width hint for display, e.g. `••••y123`
    pub fn key_hint(&self) -> String {
        let count = self.api_key.chars().count();
        let visible: String = self.api_key.chars().skip(count.saturating_sub(4)).collect();
        format!("••••{}", visible)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("api_key", &self.masked_key())
            .finish()
    }
}
