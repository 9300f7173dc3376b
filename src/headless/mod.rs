//! Headless mode - JSON event output for scripting and E2E testing
//!
//! Engine events are written to stdout as NDJSON (newline-delimited JSON),
//! one event per line. Each event has an "event" field naming its type and a
//! millisecond "timestamp".
//!
//! # Example Output
//!
//! ```json
//! {"event":"view_changed","from":"loading","to":"login","timestamp":1704700001000}
//! {"event":"logged_in","username":"sam","timestamp":1704700002000}
//! {"event":"message","id":"local-000000000001","role":"user","content":"What is 2+2?","timestamp":1704700003000}
//! ```

pub mod runner;

use std::io::{self, Write};

use botchat_app::EngineEvent;
use botchat_core::Role;
use chrono::Utc;
use serde::Serialize;
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The session moved to another view
    ViewChanged {
        from: String,
        to: String,
        timestamp: i64,
    },

    /// A credential was accepted
    LoggedIn { username: String, timestamp: i64 },

    /// The credential was cleared; `forced` when the backend rejected the key
    LoggedOut { forced: bool, timestamp: i64 },

    /// Validation or gateway message for the login form
    Notice { text: String, timestamp: i64 },

    /// A message was appended to the transcript
    Message {
        id: String,
        role: Role,
        content: String,
        timestamp: i64,
    },

    /// The transcript was seeded from history (or the greeting)
    HistoryLoaded { count: usize, timestamp: i64 },

    /// A send started or finished
    Sending { sending: bool, timestamp: i64 },

    ThemeChanged { mode: String, timestamp: i64 },

    Shutdown { timestamp: i64 },

    /// Error outside the session state machine (stdin, startup)
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Write this event as one NDJSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}

impl From<&EngineEvent> for HeadlessEvent {
    fn from(event: &EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::ViewChanged { from, to } => Self::ViewChanged {
                from: from.to_string(),
                to: to.to_string(),
                timestamp,
            },
            EngineEvent::LoggedIn { username } => Self::LoggedIn {
                username: username.clone(),
                timestamp,
            },
            EngineEvent::LoggedOut { forced } => Self::LoggedOut {
                forced: *forced,
                timestamp,
            },
            EngineEvent::NoticeRaised { text } => Self::Notice {
                text: text.clone(),
                timestamp,
            },
            EngineEvent::MessageAppended { message } => Self::Message {
                id: message.id.to_string(),
                role: message.role,
                content: message.content.clone(),
                timestamp,
            },
            EngineEvent::MessagesReplaced { count } => Self::HistoryLoaded {
                count: *count,
                timestamp,
            },
            EngineEvent::SendingChanged { sending } => Self::Sending {
                sending: *sending,
                timestamp,
            },
            EngineEvent::ThemeChanged { mode } => Self::ThemeChanged {
                mode: mode.to_string(),
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}
