//! Quit the chat cleanly on SIGINT/SIGTERM
//!
//! In raw mode Ctrl+C arrives as a key event, so this mostly matters for
//! headless runs and for `kill` from another shell.

use botchat_core::prelude::*;
use tokio::sync::mpsc;

use crate::message::Message;

/// Forward the first termination signal to the engine as [`Message::Quit`]
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match next_termination_signal().await {
            Ok(name) => {
                info!("{} received, ending chat session", name);
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Engine already stopped, ignoring {}", name);
                }
            }
            Err(e) => warn!("Signals unavailable, relying on key input to quit: {}", e),
        }
    });
}

#[cfg(unix)]
async fn next_termination_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("{} listener: {}", name, e)))
    };
    let mut sigint = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut sigterm = listen(SignalKind::terminate(), "SIGTERM")?;

    Ok(tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    })
}

#[cfg(windows)]
async fn next_termination_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Ctrl+C listener: {}", e)))?;
    Ok("Ctrl+C")
}
