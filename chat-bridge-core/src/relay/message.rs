//! Value types carried through the relay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A producer message awaiting single delivery to the consumer
///
/// Identity is exact body equality; there is no id field. The message is
/// destroyed when the consumer dequeues it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message text content
    pub body: String,
    /// Arrival timestamp
    pub received_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message stamped with the current time
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            received_at: Utc::now(),
        }
    }
}

/// A consumer reply held in the response log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEntry {
    /// Sequence index assigned at append time, never reused
    pub seq: u64,
    /// Reply text content
    pub text: String,
    /// Append timestamp
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let message = Message::new("hello");
        assert_eq!(message.body, "hello");
    }
}
