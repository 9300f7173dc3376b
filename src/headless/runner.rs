//! Headless mode runner - main event loop without TUI
//!
//! Reads commands from stdin and prints every engine event as NDJSON.

use std::sync::Arc;

use botchat_app::config::Settings;
use botchat_app::{Engine, EngineEvent, Message, Stores};
use botchat_core::prelude::*;
use botchat_gateway::BackendGateway;
use tokio::sync::{broadcast, mpsc};

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI
pub async fn run_headless<G>(
    bot_id: &str,
    settings: Settings,
    stores: Stores,
    gateway: Arc<G>,
) -> Result<()>
where
    G: BackendGateway + Send + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("botchat starting in HEADLESS mode");
    info!("Bot: {}", bot_id);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(bot_id, settings, stores, gateway);
    let mut events = engine.subscribe();

    // Stdin is read on a plain thread; tokio's stdin is blocking anyway
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    engine.start();
    emit_pending(&mut events);

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown();
    emit_pending(&mut events);

    info!("botchat headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop<G>(
    engine: &mut Engine<G>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    G: BackendGateway + Send + Sync + 'static,
{
    while !engine.should_quit() {
        if !engine.process_next().await {
            info!("Message channel closed");
            break;
        }
        emit_pending(events);
    }
    Ok(())
}

/// Print every event broadcast since the last call
fn emit_pending(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from(&event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!("Headless output lagged, {} event(s) dropped", n);
                HeadlessEvent::error(format!("{} event(s) dropped", n), false).emit();
            }
            Err(_) => break,
        }
    }
}

/// Translate one stdin line into a message
///
/// `/login <username> <api_key>`, `/logout`, `/theme` and `/quit` are
/// commands. Any other non-blank line is sent as a chat message, verbatim.
pub fn parse_command(line: &str) -> Option<Message> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    match parts.next() {
        Some("/login") => match (parts.next(), parts.next(), parts.next()) {
            (Some(username), Some(api_key), None) => Some(Message::SubmitCredential {
                username: username.to_string(),
                api_key: api_key.to_string(),
            }),
            _ => {
                warn!("Usage: /login <username> <api_key>");
                HeadlessEvent::error("usage: /login <username> <api_key>", false).emit();
                None
            }
        },
        Some("/logout") => Some(Message::Logout),
        Some("/theme") => Some(Message::ToggleTheme),
        Some("/quit") => Some(Message::Quit),
        _ => Some(Message::SendMessage {
            text: line.strip_suffix('\r').unwrap_or(line).to_string(),
        }),
    }
}

/// Read stdin lines and forward them as messages (blocking)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let Some(msg) = parse_command(&line) else {
                    continue;
                };
                let quit = matches!(msg, Message::Quit);
                if msg_tx.blocking_send(msg).is_err() || quit {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
