//! # botchat-gateway - Backend Gateway
//!
//! Talks to the remote chat backend: bot lookup, user registration, history
//! fetch and message send.
//!
//! Depends on [`botchat_core`] for domain types.
//!
//! ## Public API
//!
//! ### Gateway Trait
//! - [`BackendGateway`] - The four backend operations (`Send` futures)
//! - [`LocalBackendGateway`] - Non-`Send` variant generated by `trait-variant`
//!
//! ### HTTP Implementation
//! - [`HttpGateway`] - `reqwest` client speaking the backend's JSON contract
//! - [`DEFAULT_BASE_URL`], [`DEFAULT_REQUEST_TIMEOUT`]
//!
//! ### Errors
//! - [`GatewayError`] - `{ kind, message }` for every backend failure
//! - [`GatewayErrorKind`] - NotFound, Registration, Send,
//!   InvalidCredential, Network, Decode
//!
//! ### Test Helpers (feature `test-helpers`)
//! - `ScriptedGateway` - In-memory gateway with queued responses

pub mod client;
pub mod error;
pub mod gateway;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{HttpGateway, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use error::{is_credential_rejection, GatewayError, GatewayErrorKind};
pub use gateway::{BackendGateway, LocalBackendGateway};
