use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "👋 **Welcome to your AI Email Assistant!** I'm here to help you manage and understand your emails better.\n\n🤖 I can help you with:\n• **Email analysis** and summaries\n• **Finding urgent** or important emails\n• **Tracking** email activity and trends\n• **Smart insights** about your inbox\n\nWhat would you like to explore first?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    None,
    Like,
    Dislike,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub feedback: Feedback,
}

/// One chat transcript. Lives only in the in-memory session store; messages
/// are appended, never deleted.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_seq: u64,
}

impl ChatSession {
    /// Creates a session seeded with the assistant welcome message.
    pub fn new() -> Self {
        let mut session = ChatSession {
            messages: Vec::new(),
            next_seq: 0,
        };
        session.push(Role::Assistant, WELCOME_MESSAGE);
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: &str) -> String {
        self.push(Role::User, content)
    }

    pub fn push_assistant(&mut self, content: &str) -> String {
        self.push(Role::Assistant, content)
    }

    fn push(&mut self, role: Role, content: &str) -> String {
        // Time-derived ids; the sequence suffix keeps them unique when two
        // messages land in the same millisecond.
        let id = format!("{}-{}", Utc::now().timestamp_millis(), self.next_seq);
        self.next_seq += 1;
        self.messages.push(ChatMessage {
            id: id.clone(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
            feedback: Feedback::None,
        });
        id
    }

    /// Records feedback on an assistant message. Submitting the feedback a
    /// message already carries clears it back to `None`. Returns the new
    /// value, or `None` when the id is unknown or names a user message.
    pub fn set_feedback(&mut self, message_id: &str, feedback: Feedback) -> Option<Feedback> {
        let message = self.messages.iter_mut().find(|m| m.id == message_id)?;
        if message.role != Role::Assistant {
            return None;
        }
        message.feedback = if message.feedback == feedback {
            Feedback::None
        } else {
            feedback
        };
        Some(message.feedback)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
