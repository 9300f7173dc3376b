//! Test utilities for the backend gateway
//!
//! [`ScriptedGateway`] is an in-memory [`BackendGateway`] whose responses are
//! queued up front and whose calls are recorded for later assertions.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use botchat_core::{Bot, ChatMessage, MessageId, Role};
use tokio::sync::Semaphore;

use crate::error::GatewayError;
use crate::gateway::BackendGateway;

/// A call observed by [`ScriptedGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    GetBot {
        bot_id: String,
    },
    RegisterUser {
        username: String,
        api_key: String,
    },
    FetchHistory {
        bot_id: String,
        api_key: String,
    },
    SendMessage {
        bot_id: String,
        message: String,
        api_key: String,
    },
}

impl GatewayCall {
    pub fn is_send(&self) -> bool {
        matches!(self, GatewayCall::SendMessage { .. })
    }
}

#[derive(Default)]
struct Script {
    bots: HashMap<String, Bot>,
    registrations: VecDeque<Result<(), GatewayError>>,
    histories: VecDeque<Result<Vec<ChatMessage>, GatewayError>>,
    replies: VecDeque<Result<String, GatewayError>>,
    calls: Vec<GatewayCall>,
}

/// In-memory gateway with queued responses
///
/// Unscripted operations fall back to: bot lookup fails with `NotFound`,
/// registration succeeds, history is empty, send fails.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<Script>,
    reply_gate: Option<Arc<Semaphore>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `bot` resolvable by its id
    pub fn with_bot(self, bot: Bot) -> Self {
        self.lock().bots.insert(bot.id.clone(), bot);
        self
    }

    /// Hold every `send_message` until [`Self::release_reply`] is called
    pub fn with_reply_gate(mut self) -> Self {
        self.reply_gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn push_registration(&self, result: Result<(), GatewayError>) {
        self.lock().registrations.push_back(result);
    }

    pub fn push_history(&self, result: Result<Vec<ChatMessage>, GatewayError>) {
        self.lock().histories.push_back(result);
    }

    pub fn push_reply(&self, result: Result<String, GatewayError>) {
        self.lock().replies.push_back(result);
    }

    /// Let one held `send_message` complete
    pub fn release_reply(&self) {
        if let Some(gate) = &self.reply_gate {
            gate.add_permits(1);
        }
    }

    /// All calls observed so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    pub fn send_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.is_send())
            .count()
    }

    pub fn register_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, GatewayCall::RegisterUser { .. }))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BackendGateway for ScriptedGateway {
    async fn get_bot(&self, bot_id: &str) -> Result<Bot, GatewayError> {
        let mut script = self.lock();
        script.calls.push(GatewayCall::GetBot {
            bot_id: bot_id.to_string(),
        });
        script
            .bots
            .get(bot_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found("Failed to fetch bot"))
    }

    async fn register_user(&self, username: &str, api_key: &str) -> Result<(), GatewayError> {
        let mut script = self.lock();
        script.calls.push(GatewayCall::RegisterUser {
            username: username.to_string(),
            api_key: api_key.to_string(),
        });
        script.registrations.pop_front().unwrap_or(Ok(()))
    }

    async fn fetch_chat_history(
        &self,
        bot_id: &str,
        api_key: &str,
    ) -> Result<Vec<ChatMessage>, GatewayError> {
        let mut script = self.lock();
        script.calls.push(GatewayCall::FetchHistory {
            bot_id: bot_id.to_string(),
            api_key: api_key.to_string(),
        });
        script.histories.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn send_message(
        &self,
        bot_id: &str,
        message: &str,
        api_key: &str,
    ) -> Result<String, GatewayError> {
        let result = {
            let mut script = self.lock();
            script.calls.push(GatewayCall::SendMessage {
                bot_id: bot_id.to_string(),
                message: message.to_string(),
                api_key: api_key.to_string(),
            });
            script
                .replies
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::send("no scripted reply")))
        };

        if let Some(gate) = self.reply_gate.clone() {
            if let Ok(permit) = gate.acquire_owned().await {
                permit.forget();
            }
        }

        result
    }
}

/// The bot used across session tests
pub fn test_bot() -> Bot {
    Bot::new("abc123", "Helper", "Hi!")
}

/// A history entry as the backend would return it
pub fn history_message(id: &str, role: Role, content: &str) -> ChatMessage {
    ChatMessage::new(MessageId::new(id), role, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_bot_is_not_found() {
        let gw = ScriptedGateway::new().with_bot(test_bot());
        assert!(gw.get_bot("missing").await.is_err());
        assert_eq!(gw.get_bot("abc123").await.unwrap().name, "Helper");
        assert_eq!(gw.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_queued_replies_in_order() {
        let gw = ScriptedGateway::new();
        gw.push_reply(Ok("one".into()));
        gw.push_reply(Err(GatewayError::send("boom")));

        assert_eq!(gw.send_message("b", "m", "k").await.unwrap(), "one");
        assert_eq!(gw.send_message("b", "m", "k").await.unwrap_err().message, "boom");
        assert_eq!(gw.send_count(), 2);
    }

    #[tokio::test]
    async fn test_reply_gate_holds_until_released() {
        let gw = Arc::new(ScriptedGateway::new().with_reply_gate());
        gw.push_reply(Ok("late".into()));

        let task = {
            let gw = gw.clone();
            tokio::spawn(async move { gw.send_message("b", "m", "k").await })
        };

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!task.is_finished());

        gw.release_reply();
        assert_eq!(task.await.unwrap().unwrap(), "late");
    }
}
