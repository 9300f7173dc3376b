//! HTTP implementation of the backend gateway

use std::time::Duration;

use botchat_core::{Bot, ChatMessage};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GatewayError, GatewayErrorKind};
use crate::gateway::BackendGateway;
use crate::protocol::{self, RegisterRequest, SendRequest};

/// Production backend
pub const DEFAULT_BASE_URL: &str = "https://chat-bots-of61.onrender.com/api";

/// Default per-request timeout. Model inference on the backend can be slow.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend gateway speaking the chat server's JSON-over-HTTP contract
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    /// Create a gateway for `base_url` (e.g. `https://host/api`)
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, GatewayError> {
        let base = Url::parse(base_url).map_err(|e| {
            GatewayError::network(format!("Invalid backend URL '{}': {}", base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::network(format!(
                "Invalid backend URL '{}': not a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to build HTTP client: {}", e)))?;

        info!("Backend gateway using {}", base);
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Join path segments onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Read a rejected response into a classified error
    async fn rejection(response: Response, fallback: GatewayErrorKind, default: &str) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = protocol::decode_error_text(&body).unwrap_or_else(|| default.to_string());
        debug!("Backend rejected request ({}): {}", status, message);
        GatewayError::classify(fallback, Some(status.as_u16()), &message)
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    // Strip the URL; the history endpoint carries the api key in its query.
    let e = e.without_url();
    if e.is_timeout() {
        GatewayError::network(format!("The server took too long to respond: {}", e))
    } else {
        GatewayError::network(format!("Could not reach the server: {}", e))
    }
}

impl BackendGateway for HttpGateway {
    async fn get_bot(&self, bot_id: &str) -> Result<Bot, GatewayError> {
        let url = self.endpoint(&["bots", bot_id]);
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        if !response.status().is_success() {
            warn!("Bot lookup for {} returned {}", bot_id, response.status());
            return Err(GatewayError::not_found(protocol::BOT_NOT_FOUND));
        }

        let body = response.text().await.map_err(transport_error)?;
        protocol::decode_bot(&body)
    }

    async fn register_user(&self, username: &str, api_key: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(&["chat", "user"]);
        debug!("POST {} (user {})", url, username);

        let response = self
            .client
            .post(url)
            .json(&RegisterRequest { username, api_key })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::rejection(
                response,
                GatewayErrorKind::Registration,
                protocol::REGISTER_FAILED,
            )
            .await);
        }
        Ok(())
    }

    async fn fetch_chat_history(
        &self,
        bot_id: &str,
        api_key: &str,
    ) -> Result<Vec<ChatMessage>, GatewayError> {
        let mut url = self.endpoint(&["chat", bot_id, "history"]);
        debug!("GET {}", url);
        url.query_pairs_mut().append_pair("apiKey", api_key);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("History fetch failed: {}", transport_error(e));
                return Ok(Vec::new());
            }
        };

        let status = response.status();
        if status == StatusCode::NO_CONTENT || !status.is_success() {
            debug!("History fetch returned {}, treating as empty", status);
            return Ok(Vec::new());
        }

        match response.text().await {
            Ok(body) => Ok(protocol::decode_history(&body)),
            Err(e) => {
                warn!("History body unreadable: {}", transport_error(e));
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(
        &self,
        bot_id: &str,
        message: &str,
        api_key: &str,
    ) -> Result<String, GatewayError> {
        let url = self.endpoint(&["chat"]);
        debug!("POST {} ({} chars)", url, message.chars().count());

        let response = self
            .client
            .post(url)
            .json(&SendRequest {
                bot_id,
                message,
                api_key,
            })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(
                Self::rejection(response, GatewayErrorKind::Send, protocol::SEND_FAILED).await,
            );
        }

        let body = response.text().await.map_err(transport_error)?;
        protocol::decode_reply(&body)
    }
}
