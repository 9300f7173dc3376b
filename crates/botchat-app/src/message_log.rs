//! Ordered conversation transcript with unique message ids

use std::collections::HashSet;

use botchat_core::{ChatMessage, MessageId, Role};

/// Id of the synthetic greeting seeded into an empty conversation
///
/// Counter value zero, so it sorts before every locally created id.
pub const WELCOME_ID: &str = "local-000000000000";

const LOCAL_ID_PREFIX: &str = "local-";

/// Zero-padded so that text order matches creation order
const LOCAL_ID_WIDTH: usize = 12;

fn local_id(n: u64) -> MessageId {
    MessageId::new(format!(
        "{}{:0width$}",
        LOCAL_ID_PREFIX,
        n,
        width = LOCAL_ID_WIDTH
    ))
}

/// The message sequence of an active chat
///
/// Append-only except for [`MessageLog::replace_with_history`],
/// [`MessageLog::seed_welcome`] and [`MessageLog::clear`]. Every id in the
/// log is distinct.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
    ids: HashSet<MessageId>,
    next_local: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Append a message authored by the user under a fresh id
    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push_new(Role::User, content.into())
    }

    /// Append a message authored by the assistant under a fresh id
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push_new(Role::Assistant, content.into())
    }

    /// Replace everything with the server's history
    ///
    /// Server ids are kept unless empty or already taken, in which case a
    /// fresh local id is assigned. Returns the new length.
    pub fn replace_with_history(&mut self, history: Vec<ChatMessage>) -> usize {
        self.clear();
        for mut message in history {
            if message.id.is_empty() || self.ids.contains(&message.id) {
                message.id = self.fresh_id();
            }
            self.insert(message);
        }
        self.len()
    }

    /// Replace everything with a single assistant greeting
    pub fn seed_welcome(&mut self, greeting: impl Into<String>) {
        self.clear();
        self.insert(ChatMessage::assistant(MessageId::new(WELCOME_ID), greeting));
    }

    /// Drop all messages. The local id counter keeps counting.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.ids.clear();
    }

    fn push_new(&mut self, role: Role, content: String) -> &ChatMessage {
        let id = self.fresh_id();
        self.insert(ChatMessage::new(id, role, content))
    }

    fn insert(&mut self, message: ChatMessage) -> &ChatMessage {
        self.ids.insert(message.id.clone());
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Next local id not already present in the log
    fn fresh_id(&mut self) -> MessageId {
        loop {
            self.next_local += 1;
            let id = local_id(self.next_local);
            if !self.ids.contains(&id) {
                return id;
            }
        }
    }
}
