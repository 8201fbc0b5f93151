//! Chat session — conversation state keyed by an opaque identifier.

use crate::{Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side conversation state.
///
/// The message list is append-only and its order is both the
/// conversation's temporal order and the order submitted to the
/// backend. Sessions live for the process lifetime; there is no
/// expiry or eviction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Session {
    /// Unique session identifier (UUID v4).
    pub id: String,

    /// Conversation messages in append order.
    pub messages: Vec<Message>,

    /// The last injected content source, if any.
    pub page_url: Option<String>,

    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session with a generated identifier.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            messages: Vec::new(),
            page_url: None,
            created_at: Utc::now(),
        }
    }

    /// Append a turn to the conversation.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// Number of turns in this session.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether this session has no turns.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last turn, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_unique_id() {
        let a = Session::new();
        let b = Session::new();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.is_empty());
        assert!(a.page_url.is_none());
    }

    #[test]
    fn push_preserves_order() {
        let mut session = Session::new();
        session.push(Role::System, "context");
        session.push(Role::User, "question");
        session.push(Role::Assistant, "answer");

        assert_eq!(session.len(), 3);
        let roles: Vec<_> = session.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::System, Role::User, Role::Assistant]);
        assert_eq!(session.last_message().unwrap().content, "answer");
    }
}
