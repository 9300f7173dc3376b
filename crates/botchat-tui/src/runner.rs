//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use botchat_app::config::Settings;
use botchat_app::{Engine, Stores};
use botchat_core::prelude::*;
use botchat_gateway::BackendGateway;
use ratatui::DefaultTerminal;

use crate::{event, render, terminal};

/// Run the TUI for `bot_id` until the user quits or a signal arrives
pub async fn run<G>(bot_id: &str, settings: Settings, stores: Stores, gateway: Arc<G>) -> Result<()>
where
    G: BackendGateway + Send + Sync + 'static,
{
    let mut term = terminal::init();

    let mut engine = Engine::new(bot_id, settings, stores, gateway);
    info!("TUI starting for bot {}", bot_id);
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    // Late results from in-flight requests are discarded from here on
    engine.shutdown();
    terminal::restore();

    result
}

/// Main event loop
fn run_loop<G>(terminal: &mut DefaultTerminal, engine: &mut Engine<G>) -> Result<()>
where
    G: BackendGateway + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results of async actions and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
