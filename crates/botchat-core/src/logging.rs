//! File logging for the chat client
//!
//! The TUI owns the terminal, so every log line goes to a daily-rolling file
//! under the platform data directory instead of stderr.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "BOTCHAT_LOG";

/// Filter used when `BOTCHAT_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "botchat=info,warn";

const LOG_FILE_PREFIX: &str = "botchat.log";

/// Install the global subscriber
///
/// ```bash
/// BOTCHAT_LOG=botchat_gateway=debug botchat 65f1c0ffee
/// ```
pub fn init() -> Result<()> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        "botchat {} started, logging to {}",
        env!("CARGO_PKG_VERSION"),
        dir.display()
    );
    Ok(())
}

/// `<data_local_dir>/botchat/logs`, or `./botchat/logs` when the platform
/// has no data directory
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("botchat")
        .join("logs")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
