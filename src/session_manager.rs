use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::chat_message::ChatSession;

/// In-memory store of chat transcripts, keyed by the cookie-held session id.
#[derive(Clone)]
pub struct ChatSessionManager {
    sessions: Arc<Mutex<HashMap<String, ChatSession>>>,
}

impl ChatSessionManager {
    pub fn new() -> Self {
        ChatSessionManager {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Inserts or replaces a session.
    pub fn insert(&self, session_id: String, session: ChatSession) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(session_id, session);
    }

    /// Returns a snapshot of a session if it exists.
    pub fn get(&self, session_id: &str) -> Option<ChatSession> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(session_id).cloned()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        let sessions = self.sessions.lock().unwrap();
        sessions.contains_key(session_id)
    }

    pub fn remove(&self, session_id: &str) -> Option<ChatSession> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(session_id)
    }

    /// Mutates a session in place under the lock. Message appends and
    /// feedback edits are read-modify-write, so they go through here rather
    /// than a get/insert pair. Returns `None` if the session is gone.
    pub fn with_session<F, R>(&self, session_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut ChatSession) -> R,
    {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.get_mut(session_id).map(f)
    }
}

impl Default for ChatSessionManager {
    fn default() -> Self {
        Self::new()
    }
}
