//! Pluggable conversation memory backend.
//!
//! Memory is the ordered context of prior exchanges handed back to the
//! model on every call. It only grows; nothing here removes or rewrites a
//! message once appended.

use crate::Message;
use anyhow::Result;

/// Conversation memory backend.
///
/// Load returns the message history, append stores the messages produced
/// by one successful turn.
pub trait Memory: Send + Sync {
    /// Load the conversation history, oldest first.
    fn load(&self) -> impl Future<Output = Result<Vec<Message>>> + Send;

    /// Append new messages produced during a turn.
    fn append(&mut self, messages: &[Message]) -> impl Future<Output = Result<()>> + Send;

    /// Number of stored messages.
    fn len(&self) -> usize;

    /// Whether nothing has been stored yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Simple in-memory storage that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemory {
    messages: Vec<Message>,
}

impl InMemory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the stored messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl Memory for InMemory {
    async fn load(&self) -> Result<Vec<Message>> {
        Ok(self.messages.clone())
    }

    async fn append(&mut self, messages: &[Message]) -> Result<()> {
        self.messages.extend_from_slice(messages);
        Ok(())
    }

    fn len(&self) -> usize {
        self.messages.len()
    }
}
