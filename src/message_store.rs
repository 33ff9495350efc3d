use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How far back a poll reaches when the client gives no `start_from`.
const DEFAULT_WINDOW_MINUTES: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub author: String,
    pub time: DateTime<Utc>,
}

/// Result of a poll: every matching message plus the server time at query
/// execution, which the client passes back as its next `start_from`.
#[derive(Debug, Serialize)]
pub struct MessageBatch {
    pub messages: Vec<Message>,
    pub start_next_from: DateTime<Utc>,
}

/// Append-only in-memory message log. Nothing is ever evicted, so the log
/// grows for the lifetime of the process; matches the source system, which
/// keeps no history across restarts either.
pub struct MessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    pub fn new() -> MessageStore {
        MessageStore {
            messages: RwLock::new(Vec::new()),
        }
    }

    /// Stamps the message with the current server time, appends it and
    /// returns the stored copy. Any time the client supplied is discarded
    /// before this point.
    pub fn append(&self, text: String, author: String) -> Message {
        let message = Message {
            text,
            author,
            time: Utc::now(),
        };
        let mut messages = self.messages.write().unwrap();
        messages.push(message.clone());
        message
    }

    /// Returns every message with `time >= start_from` in append order.
    /// Without `start_from` the window is the last ten minutes.
    pub fn list(&self, start_from: Option<DateTime<Utc>>) -> MessageBatch {
        let now = Utc::now();
        let start_from =
            start_from.unwrap_or_else(|| now - Duration::minutes(DEFAULT_WINDOW_MINUTES));
        let messages = self.messages.read().unwrap();
        let matching = messages
            .iter()
            .filter(|m| m.time >= start_from)
            .cloned()
            .collect();
        MessageBatch {
            messages: matching,
            start_next_from: now,
        }
    }
}

impl Default for MessageStore {
    fn default() -> MessageStore {
        MessageStore::new()
    }
}
