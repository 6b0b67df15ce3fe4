//! In-memory transcript and activity log.
//!
//! Both are append-only. Nothing here is persisted; dropping the store
//! discards the conversation.

use serde::Serialize;
use tracing::debug;

use crate::types::{AgentActivity, Message};

/// Ordered transcript plus the processing flag
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationStore {
    messages: Vec<Message>,
    processing: bool,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the transcript.
    ///
    /// A user message with empty content is dropped. Returns whether the
    /// message was appended.
    pub fn append_message(&mut self, message: Message) -> bool {
        if message.is_user() && message.content.is_empty() {
            debug!("Dropping empty user message");
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Full history of activity records
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityLog {
    entries: Vec<AgentActivity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, activity: AgentActivity) {
        self.entries.push(activity);
    }

    pub fn entries(&self) -> &[AgentActivity] {
        &self.entries
    }

    /// The last `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &AgentActivity> {
        let start = self.entries.len().saturating_sub(limit);
        self.entries[start..].iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
