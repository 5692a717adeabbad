//! Relay coordinator

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

use super::dedup::DedupGuard;
use super::log::{ReplyPoll, ResponseLog};
use super::message::Message;
use super::queue::PendingQueue;

/// State behind the admission lock
///
/// The dedup guard and the pending queue move together so that the guard
/// insertion happens-before the enqueue under one lock acquisition; no
/// interleaving of concurrent submitters can admit the same body twice.
#[derive(Debug, Default)]
struct Admission {
    dedup: DedupGuard,
    queue: PendingQueue,
}

/// Coordinates the relay's shared state under two independent locks
///
/// One lock guards the submission/consumption path (dedup guard plus
/// pending queue), the other guards the reply path (response log plus
/// cursor). Unrelated operations never serialize each other, no lock is
/// held across I/O or an await point, and no operation takes both locks.
#[derive(Debug)]
pub struct Relay {
    admission: Mutex<Admission>,
    replies: Mutex<ResponseLog>,
}

impl Relay {
    /// Create a relay whose reply log keeps at most `max_responses` entries
    pub fn new(max_responses: usize) -> Self {
        Self {
            admission: Mutex::new(Admission::default()),
            replies: Mutex::new(ResponseLog::new(max_responses)),
        }
    }

    /// Admit a producer message for delivery to the consumer
    ///
    /// Rejects empty or whitespace-only input with
    /// [`Error::InvalidInput`] and a previously accepted body with
    /// [`Error::DuplicateMessage`]. Acceptance permanently records the
    /// body in the dedup guard.
    pub fn submit_message(&self, body: impl Into<String>) -> Result<()> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(Error::InvalidInput("message is required".to_string()));
        }

        let mut admission = self.admission.lock();
        if !admission.dedup.accept(&body) {
            debug!("duplicate message rejected");
            return Err(Error::DuplicateMessage);
        }
        admission.queue.enqueue(Message::new(body));
        Ok(())
    }

    /// Dequeue the oldest pending message, if any
    ///
    /// Non-blocking single delivery: the message is removed from the
    /// queue and will not be handed to any other poller.
    pub fn poll_message(&self) -> Option<Message> {
        self.admission.lock().queue.try_dequeue()
    }

    /// Record a consumer reply, evicting the oldest beyond capacity
    ///
    /// Returns the assigned sequence index.
    pub fn submit_response(&self, text: impl Into<String>) -> Result<u64> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("response is required".to_string()));
        }

        let seq = self.replies.lock().append(text);
        debug!(seq, "reply stored");
        Ok(seq)
    }

    /// Hand out the next undelivered reply, if any
    ///
    /// The three outcomes stay distinct: `Empty` (no reply has ever
    /// arrived) and `NoNew` (caught up) both mean "keep polling" but are
    /// reported separately for diagnostics.
    pub fn poll_response(&self) -> ReplyPoll {
        self.replies.lock().next_unseen()
    }

    /// Number of messages currently awaiting delivery
    pub fn pending_len(&self) -> usize {
        self.admission.lock().queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_submit_then_duplicate() {
        let relay = Relay::new(10);
        assert!(relay.submit_message("hello").is_ok());
        assert!(matches!(
            relay.submit_message("hello"),
            Err(Error::DuplicateMessage)
        ));
    }

    #[test]
    fn test_empty_message_rejected() {
        let relay = Relay::new(10);
        assert!(matches!(
            relay.submit_message(""),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            relay.submit_message("   "),
            Err(Error::InvalidInput(_))
        ));
        assert!(relay.poll_message().is_none());
    }

    #[test]
    fn test_submit_poll_roundtrip() {
        let relay = Relay::new(10);
        relay.submit_message("hello").unwrap();

        let message = relay.poll_message().unwrap();
        assert_eq!(message.body, "hello");
        assert!(relay.poll_message().is_none());
    }

    #[test]
    fn test_messages_delivered_fifo() {
        let relay = Relay::new(10);
        relay.submit_message("b1").unwrap();
        relay.submit_message("b2").unwrap();

        assert_eq!(relay.poll_message().unwrap().body, "b1");
        assert_eq!(relay.poll_message().unwrap().body, "b2");
    }

    #[test]
    fn test_dedup_outlives_consumption() {
        let relay = Relay::new(10);
        relay.submit_message("hello").unwrap();
        relay.poll_message().unwrap();
        // consuming the message does not make the body resubmittable
        assert!(matches!(
            relay.submit_message("hello"),
            Err(Error::DuplicateMessage)
        ));
    }

    #[test]
    fn test_empty_response_rejected() {
        let relay = Relay::new(10);
        assert!(matches!(
            relay.submit_response(""),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(relay.poll_response(), ReplyPoll::Empty);
    }

    #[test]
    fn test_response_roundtrip_in_order() {
        let relay = Relay::new(10);
        relay.submit_response("r1").unwrap();
        relay.submit_response("r2").unwrap();

        assert_eq!(
            relay.poll_response(),
            ReplyPoll::Ready {
                text: "r1".to_string(),
                seq: 0
            }
        );
        assert_eq!(
            relay.poll_response(),
            ReplyPoll::Ready {
                text: "r2".to_string(),
                seq: 1
            }
        );
        assert_eq!(relay.poll_response(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_poll_response_empty_vs_no_new() {
        let relay = Relay::new(10);
        assert_eq!(relay.poll_response(), ReplyPoll::Empty);

        relay.submit_response("r").unwrap();
        relay.poll_response();
        assert_eq!(relay.poll_response(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_concurrent_submissions_delivered_exactly_once() {
        const WORKERS: usize = 8;
        let relay = Arc::new(Relay::new(10));

        let mut handles = Vec::new();
        for i in 0..WORKERS {
            let relay = relay.clone();
            handles.push(std::thread::spawn(move || {
                relay.submit_message(format!("body {}", i)).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let mut pollers = Vec::new();
        for _ in 0..WORKERS {
            let relay = relay.clone();
            pollers.push(std::thread::spawn(move || {
                relay.poll_message().map(|m| m.body)
            }));
        }

        let mut delivered = Vec::new();
        for poller in pollers {
            if let Some(body) = poller.join().unwrap() {
                delivered.push(body);
            }
        }

        // each body delivered exactly once, none lost, none duplicated
        let unique: HashSet<_> = delivered.iter().cloned().collect();
        assert_eq!(delivered.len(), WORKERS);
        assert_eq!(unique.len(), WORKERS);
        assert!(relay.poll_message().is_none());
    }

    #[test]
    fn test_concurrent_duplicate_submissions_single_winner() {
        const RACERS: usize = 8;
        let relay = Arc::new(Relay::new(10));

        let mut handles = Vec::new();
        for _ in 0..RACERS {
            let relay = relay.clone();
            handles.push(std::thread::spawn(move || {
                relay.submit_message("contested").is_ok()
            }));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(wins, 1);
        assert_eq!(relay.pending_len(), 1);
    }
}
