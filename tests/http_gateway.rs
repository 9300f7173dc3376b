//! HttpGateway against a minimal in-process HTTP backend
//!
//! The mock speaks just enough HTTP/1.1 for one request per connection and
//! records every request it sees.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use botchat_core::Role;
use botchat_gateway::test_utils::test_bot;
use botchat_gateway::{BackendGateway, GatewayErrorKind, HttpGateway};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const API_KEY: &str = "AIzaSy-validkey123";

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    target: String,
    body: String,
}

impl RecordedRequest {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

type Handler = Arc<dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync>;

struct MockBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// Serve every request with `handler`
    async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = handler.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, handler, recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/api", addr),
            requests,
        }
    }

    /// Respond to everything with a fixed status and body
    async fn fixed(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::start(move |_| (status, body.clone())).await
    }

    fn gateway(&self) -> HttpGateway {
        HttpGateway::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

async fn serve(
    mut stream: TcpStream,
    handler: Handler,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = buf.len().min(header_end + content_length);
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let request = RecordedRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        target: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..end]).to_string(),
    };

    let (status, body) = handler(&request);
    recorded.lock().unwrap().push(request);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_phrase(status),
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

// ─────────────────────────────────────────────────────────
// Bot lookup
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn get_bot_decodes_payload_and_ignores_extra_fields() {
    let backend = MockBackend::fixed(
        200,
        json!({
            "_id": "abc123",
            "name": "Helper",
            "welcomeMessage": "Hi!",
            "systemInstruction": "Be brief",
            "createdAt": "2024-01-01T00:00:00Z"
        })
        .to_string(),
    )
    .await;

    let bot = backend.gateway().get_bot("abc123").await.unwrap();

    assert_eq!(bot, test_bot());
    let request = backend.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/api/bots/abc123");
}

#[tokio::test]
async fn get_bot_non_success_is_not_found() {
    let backend = MockBackend::fixed(404, json!({"error": "Bot not found"}).to_string()).await;

    let err = backend.gateway().get_bot("missing").await.unwrap_err();

    assert_eq!(err.kind, GatewayErrorKind::NotFound);
    assert_eq!(err.message, "Failed to fetch bot");
}

#[tokio::test]
async fn get_bot_percent_encodes_the_id() {
    let backend = MockBackend::fixed(404, "").await;

    let _ = backend.gateway().get_bot("a/b c").await;

    assert_eq!(backend.only_request().target, "/api/bots/a%2Fb%20c");
}

// ─────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn register_user_posts_credential() {
    let backend = MockBackend::fixed(201, json!({"_id": "u1"}).to_string()).await;

    backend
        .gateway()
        .register_user("sam", API_KEY)
        .await
        .unwrap();

    let request = backend.only_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/api/chat/user");
    assert_eq!(request.json(), json!({"username": "sam", "apiKey": API_KEY}));
}

#[tokio::test]
async fn register_user_failure_carries_backend_message() {
    let backend =
        MockBackend::fixed(400, json!({"error": "Username already taken"}).to_string()).await;

    let err = backend
        .gateway()
        .register_user("sam", API_KEY)
        .await
        .unwrap_err();

    assert_eq!(err.kind, GatewayErrorKind::Registration);
    assert_eq!(err.message, "Username already taken");
}

#[tokio::test]
async fn register_user_unauthorized_is_invalid_credential() {
    let backend = MockBackend::fixed(401, "").await;

    let err = backend
        .gateway()
        .register_user("sam", API_KEY)
        .await
        .unwrap_err();

    assert_eq!(err.kind, GatewayErrorKind::InvalidCredential);
    assert_eq!(err.message, "Failed to register user");
}

// ─────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_history_passes_key_as_query() {
    let backend = MockBackend::fixed(
        200,
        json!([
            {"id": "h1", "role": "user", "content": "earlier"},
            {"id": 7, "role": "assistant", "content": "reply"},
            {"id": "h3", "role": "system", "content": "hidden"}
        ])
        .to_string(),
    )
    .await;

    let history = backend
        .gateway()
        .fetch_chat_history("abc123", API_KEY)
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "earlier");
    assert_eq!(history[1].id.as_str(), "7");

    let request = backend.only_request();
    assert_eq!(request.method, "GET");
    assert_eq!(
        request.target,
        format!("/api/chat/abc123/history?apiKey={}", API_KEY)
    );
}

#[tokio::test]
async fn fetch_history_failures_are_empty() {
    for (status, body) in [
        (500, json!({"error": "boom"}).to_string()),
        (204, String::new()),
        (200, "not json".to_string()),
        (200, json!({"messages": []}).to_string()),
    ] {
        let backend = MockBackend::fixed(status, body).await;
        let history = backend
            .gateway()
            .fetch_chat_history("abc123", API_KEY)
            .await
            .unwrap();
        assert!(history.is_empty(), "status {} should yield no history", status);
    }
}

// ─────────────────────────────────────────────────────────
// Send
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn send_message_returns_reply_content() {
    let backend = MockBackend::start(|request| {
        if request.method == "POST" && request.target == "/api/chat" {
            (200, json!({"content": "4"}).to_string())
        } else {
            (404, String::new())
        }
    })
    .await;

    let reply = backend
        .gateway()
        .send_message("abc123", "What is 2+2?", API_KEY)
        .await
        .unwrap();

    assert_eq!(reply, "4");
    assert_eq!(
        backend.only_request().json(),
        json!({"botId": "abc123", "message": "What is 2+2?", "apiKey": API_KEY})
    );
}

#[tokio::test]
async fn send_message_invalid_key_is_classified() {
    let backend = MockBackend::fixed(
        500,
        json!({"error": "Invalid Google Gemini API Key"}).to_string(),
    )
    .await;

    let err = backend
        .gateway()
        .send_message("abc123", "hello", API_KEY)
        .await
        .unwrap_err();

    assert!(err.is_invalid_credential());
    assert_eq!(err.message, "Invalid Google Gemini API Key");
}

#[tokio::test]
async fn send_message_failure_without_error_field_uses_default() {
    let backend = MockBackend::fixed(500, "").await;

    let err = backend
        .gateway()
        .send_message("abc123", "hello", API_KEY)
        .await
        .unwrap_err();

    assert_eq!(err.kind, GatewayErrorKind::Send);
    assert_eq!(err.message, "Failed to send message");
}

#[tokio::test]
async fn send_message_reply_without_content_is_decode_error() {
    let backend = MockBackend::fixed(200, json!({"ok": true}).to_string()).await;

    let err = backend
        .gateway()
        .send_message("abc123", "hello", API_KEY)
        .await
        .unwrap_err();

    assert_eq!(err.kind, GatewayErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpGateway::new(&format!("http://{}/api", addr), Duration::from_secs(5)).unwrap();
    let err = gateway
        .send_message("abc123", "hello", API_KEY)
        .await
        .unwrap_err();

    assert_eq!(err.kind, GatewayErrorKind::Network);
    assert!(!err.message.contains(API_KEY));
}
