//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Each action runs as one tokio task that calls the gateway and sends a
//! single result message back to the engine. Tasks never touch state.

use std::sync::Arc;

use botchat_gateway::BackendGateway;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action by spawning a background task
pub fn handle_action<G>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, gateway: Arc<G>)
where
    G: BackendGateway + Send + Sync + 'static,
{
    match action {
        UpdateAction::FetchBot { epoch, bot_id } => {
            tokio::spawn(async move {
                let msg = match gateway.get_bot(&bot_id).await {
                    Ok(bot) => Message::BotLoaded { epoch, bot_id, bot },
                    Err(error) => Message::BotLoadFailed {
                        epoch,
                        bot_id,
                        error,
                    },
                };
                deliver(&msg_tx, msg).await;
            });
        }

        UpdateAction::RegisterUser { epoch, credential } => {
            tokio::spawn(async move {
                let result = gateway
                    .register_user(&credential.username, &credential.api_key)
                    .await;
                let msg = match result {
                    Ok(()) => {
                        info!("Registered user {}", credential.username);
                        Message::RegisterSucceeded { epoch, credential }
                    }
                    Err(error) => Message::RegisterFailed { epoch, error },
                };
                deliver(&msg_tx, msg).await;
            });
        }

        UpdateAction::FetchHistory {
            epoch,
            bot_id,
            api_key,
        } => {
            tokio::spawn(async move {
                let msg = match gateway.fetch_chat_history(&bot_id, &api_key).await {
                    Ok(messages) => {
                        debug!("Fetched {} history message(s)", messages.len());
                        Message::HistoryLoaded { epoch, messages }
                    }
                    Err(error) => Message::HistoryFailed { epoch, error },
                };
                deliver(&msg_tx, msg).await;
            });
        }

        UpdateAction::SendMessage {
            epoch,
            bot_id,
            text,
            api_key,
        } => {
            tokio::spawn(async move {
                let msg = match gateway.send_message(&bot_id, &text, &api_key).await {
                    Ok(content) => Message::ReplyReceived { epoch, content },
                    Err(error) => Message::SendFailed { epoch, error },
                };
                deliver(&msg_tx, msg).await;
            });
        }
    }
}

async fn deliver(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Engine channel closed, dropping result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botchat_core::Credential;
    use botchat_gateway::test_utils::{test_bot, GatewayCall, ScriptedGateway};
    use botchat_gateway::GatewayError;

    #[tokio::test]
    async fn test_fetch_bot_success_echoes_epoch() {
        let gateway = Arc::new(ScriptedGateway::new().with_bot(test_bot()));
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(
            UpdateAction::FetchBot {
                epoch: 7,
                bot_id: "abc123".into(),
            },
            tx,
            gateway,
        );

        match rx.recv().await {
            Some(Message::BotLoaded { epoch, bot, .. }) => {
                assert_eq!(epoch, 7);
                assert_eq!(bot.name, "Helper");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_bot_failure() {
        let gateway = Arc::new(ScriptedGateway::new());
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(
            UpdateAction::FetchBot {
                epoch: 0,
                bot_id: "missing".into(),
            },
            tx,
            gateway,
        );

        assert!(matches!(
            rx.recv().await,
            Some(Message::BotLoadFailed { ref bot_id, .. }) if bot_id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_register_forwards_credential() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_registration(Err(GatewayError::registration("Bad key")));
        let (tx, mut rx) = mpsc::channel(8);

        let credential = Credential::new("sam", "AIzaSy-validkey123").unwrap();
        handle_action(
            UpdateAction::RegisterUser {
                epoch: 1,
                credential,
            },
            tx,
            gateway.clone(),
        );

        assert!(matches!(
            rx.recv().await,
            Some(Message::RegisterFailed { epoch: 1, .. })
        ));
        assert_eq!(
            gateway.calls(),
            vec![GatewayCall::RegisterUser {
                username: "sam".into(),
                api_key: "AIzaSy-validkey123".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_send_message_reply() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_reply(Ok("4".into()));
        let (tx, mut rx) = mpsc::channel(8);

        handle_action(
            UpdateAction::SendMessage {
                epoch: 2,
                bot_id: "abc123".into(),
                text: "What is 2+2?".into(),
                api_key: "AIzaSy-validkey123".into(),
            },
            tx,
            gateway,
        );

        assert!(matches!(
            rx.recv().await,
            Some(Message::ReplyReceived { epoch: 2, ref content }) if content == "4"
        ));
    }
}
