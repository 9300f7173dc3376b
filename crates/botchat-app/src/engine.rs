//! Engine - shared orchestration for the TUI and headless runners
//!
//! The Engine owns the application state, the message channel and the
//! gateway, and broadcasts [`EngineEvent`]s after each processed message.

use std::sync::Arc;

use botchat_gateway::BackendGateway;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, trace};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;
use crate::store::Stores;

/// Capacity of the message channel and the event broadcast
const CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for one chat session
pub struct Engine<G> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    gateway: Arc<G>,

    /// Event broadcaster for external consumers
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<G> Engine<G>
where
    G: BackendGateway + Send + Sync + 'static,
{
    /// Create an engine for `bot_id`.
    ///
    /// Must be called inside a tokio runtime (spawns the signal handler).
    /// Call [`Engine::start`] to issue the bot lookup.
    pub fn new(
        bot_id: impl Into<String>,
        settings: Settings,
        stores: Stores,
        gateway: Arc<G>,
    ) -> Self {
        let state = AppState::new(bot_id, settings, stores);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        signals::spawn_signal_handler(msg_tx.clone());

        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            state,
            msg_tx,
            msg_rx,
            gateway,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped and `RecvError::Lagged` is reported.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Begin the session
    pub fn start(&mut self) {
        self.process_message(Message::Start);
    }

    /// Process a single message through the TEA update cycle, then broadcast
    /// the events it produced
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.gateway);
        self.flush_events();
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` if the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop the session: results of in-flight requests will be discarded
    pub fn shutdown(&mut self) {
        let epoch = self.state.bump_epoch();
        self.state.request_quit();
        info!("Engine shutting down (epoch {})", epoch);
        self.emit(EngineEvent::Shutdown);
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            self.emit(event);
        }
    }

    /// send() returns Err only if there are no receivers, which is fine.
    fn emit(&self, event: EngineEvent) {
        trace!("EngineEvent::{}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::View;
    use botchat_gateway::test_utils::{test_bot, ScriptedGateway};
    use std::time::Duration;
    use tempfile::tempdir;

    async fn next(engine: &mut Engine<ScriptedGateway>) {
        tokio::time::timeout(Duration::from_secs(2), engine.process_next())
            .await
            .expect("timed out waiting for a message");
    }

    #[tokio::test]
    async fn test_start_loads_bot_into_login() {
        let temp = tempdir().unwrap();
        let gateway = Arc::new(ScriptedGateway::new().with_bot(test_bot()));
        let mut engine = Engine::new(
            "abc123",
            Settings::default(),
            Stores::new(temp.path()),
            gateway,
        );
        let mut events = engine.subscribe();

        engine.start();
        next(&mut engine).await;

        assert_eq!(engine.state.view(), View::Login);
        assert!(matches!(
            events.try_recv(),
            Ok(EngineEvent::ViewChanged {
                from: View::Loading,
                to: View::Login
            })
        ));
    }

    #[tokio::test]
    async fn test_shutdown_bumps_epoch_and_quits() {
        let temp = tempdir().unwrap();
        let gateway = Arc::new(ScriptedGateway::new());
        let mut engine = Engine::new(
            "abc123",
            Settings::default(),
            Stores::new(temp.path()),
            gateway,
        );
        let mut events = engine.subscribe();

        engine.start();
        engine.shutdown();

        // The bot lookup result arrives after shutdown and must be ignored
        next(&mut engine).await;
        assert_eq!(engine.state.view(), View::Loading);
        assert!(engine.should_quit());
        assert!(matches!(events.try_recv(), Ok(EngineEvent::Shutdown)));
    }

    #[tokio::test]
    async fn test_drain_pending_messages() {
        let temp = tempdir().unwrap();
        let gateway = Arc::new(ScriptedGateway::new());
        let mut engine = Engine::new(
            "abc123",
            Settings::default(),
            Stores::new(temp.path()),
            gateway,
        );

        engine.msg_sender().send(Message::Tick).await.unwrap();
        engine.msg_sender().send(Message::Quit).await.unwrap();

        assert_eq!(engine.drain_pending_messages(), 2);
        assert!(engine.should_quit());
    }
}
