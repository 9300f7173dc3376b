//! # botchat-core - Core Domain Types
//!
//! Foundation crate for botchat. Provides domain types, credential validation,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Bot`] - A configured chat persona (id, name, welcome text)
//! - [`ChatMessage`] - One entry of a conversation
//! - [`Role`] - Author of a message (user or assistant)
//! - [`MessageId`] - Opaque message identifier
//! - [`ThemeMode`] - Light/dark colour preference
//!
//! ### Credentials (`credential`)
//! - [`Credential`] - The (username, api key) pair authorizing chat access
//! - [`CredentialError`] - Local validation failures
//! - [`MIN_API_KEY_LEN`] - Minimum accepted api key length
//!
//! ### Error Handling (`error`)
//! - [`Error`] - IO, terminal and storage failures
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use botchat_core::prelude::*;
//! ```

pub mod credential;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all botchat crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use credential::{Credential, CredentialError, MIN_API_KEY_LEN};
pub use error::{Error, Result};
pub use types::{Bot, ChatMessage, MessageId, Role, ThemeMode};
