//! Per-player conversation history.
//!
//! Histories live in process memory only and are lost on restart. Each
//! player's sequence is ordered oldest first and only ever holds `user` and
//! `assistant` turns.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Storage for per-player message sequences.
///
/// Injected into the relay so an alternative backend can be swapped in
/// without touching request handling.
pub trait HistoryStore: Send + Sync {
    /// Append a message to the player's sequence, creating it if missing.
    ///
    /// Returns a snapshot of the full sequence after the append.
    fn append(&self, player_id: &str, message: Message) -> Vec<Message>;

    /// Snapshot of the player's sequence. Empty for unknown players.
    fn history(&self, player_id: &str) -> Vec<Message>;

    /// Reset the player's sequence to empty, creating the key if absent.
    fn clear(&self, player_id: &str);
}

/// In-memory history store keyed by player identifier.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    histories: DashMap<String, Vec<Message>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sequence (possibly empty) exists for the player.
    pub fn contains(&self, player_id: &str) -> bool {
        self.histories.contains_key(player_id)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, player_id: &str, message: Message) -> Vec<Message> {
        let mut entry = self.histories.entry(player_id.to_string()).or_default();
        entry.push(message);
        entry.value().clone()
    }

    fn history(&self, player_id: &str) -> Vec<Message> {
        self.histories
            .get(player_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn clear(&self, player_id: &str) {
        self.histories.insert(player_id.to_string(), Vec::new());
    }
}
