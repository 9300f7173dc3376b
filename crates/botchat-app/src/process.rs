//! Message processing
//!
//! Runs a message through the TEA update function, follows up on any
//! chained messages, and dispatches the resulting actions.

use std::sync::Arc;

use botchat_gateway::BackendGateway;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<G>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    gateway: &Arc<G>,
) where
    G: BackendGateway + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), gateway.clone());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
