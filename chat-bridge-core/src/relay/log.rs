//! Bounded response log with a shared delivery cursor

use std::collections::VecDeque;

use chrono::Utc;
use tracing::debug;

use super::message::ResponseEntry;

/// Outcome of a producer poll against the response log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPoll {
    /// A previously undelivered reply, handed out exactly once
    Ready {
        /// Reply text
        text: String,
        /// Sequence index of the delivered entry
        seq: u64,
    },
    /// The cursor is caught up; nothing new since the last delivery
    NoNew,
    /// No reply has ever been appended
    Empty,
}

/// Bounded, append-only reply log with a single shared delivery cursor
///
/// Sequence indices are assigned in strict append order and never reused,
/// even across eviction. The cursor only moves forward; replies evicted
/// before the cursor reaches them are permanently unreachable. That loss
/// is a deliberate trade-off of the bounded log, not a defect.
#[derive(Debug)]
pub struct ResponseLog {
    entries: VecDeque<ResponseEntry>,
    capacity: usize,
    /// Sequence index the next appended entry will receive
    next_seq: u64,
    /// Last delivered sequence index; `None` until the first delivery
    cursor: Option<u64>,
}

impl ResponseLog {
    /// Create an empty log holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_seq: 0,
            cursor: None,
        }
    }

    /// Append a reply, evicting from the front beyond capacity
    ///
    /// Returns the assigned sequence index.
    pub fn append(&mut self, text: impl Into<String>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(ResponseEntry {
            seq,
            text: text.into(),
            timestamp: Utc::now(),
        });
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                debug!(seq = evicted.seq, "evicted reply beyond capacity");
            }
        }
        seq
    }

    /// Hand out the next undelivered reply, advancing the cursor one step
    ///
    /// Delivery is strictly in append order, one entry per call, and a
    /// given sequence index is delivered at most once. When entries just
    /// ahead of the cursor were evicted, the cursor jumps forward to the
    /// oldest surviving entry and the skipped replies are lost.
    pub fn next_unseen(&mut self) -> ReplyPoll {
        let (oldest, newest) = match (self.entries.front(), self.entries.back()) {
            (Some(front), Some(back)) => (front.seq, back.seq),
            _ => {
                return if self.next_seq == 0 {
                    ReplyPoll::Empty
                } else {
                    ReplyPoll::NoNew
                };
            }
        };

        let target = self.cursor.map_or(0, |c| c + 1);
        if target > newest {
            return ReplyPoll::NoNew;
        }

        let seq = target.max(oldest);
        if seq > target {
            debug!(from = target, to = seq, "cursor skipped evicted replies");
        }
        let idx = (seq - oldest) as usize;
        let text = self.entries[idx].text.clone();
        self.cursor = Some(seq);
        ReplyPoll::Ready { text, seq }
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log currently holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(text: &str, seq: u64) -> ReplyPoll {
        ReplyPoll::Ready {
            text: text.to_string(),
            seq,
        }
    }

    #[test]
    fn test_empty_poll_is_idempotent() {
        let mut log = ResponseLog::new(10);
        assert_eq!(log.next_unseen(), ReplyPoll::Empty);
        assert_eq!(log.next_unseen(), ReplyPoll::Empty);
    }

    #[test]
    fn test_delivery_in_append_order() {
        let mut log = ResponseLog::new(10);
        log.append("r1");
        log.append("r2");
        log.append("r3");

        assert_eq!(log.next_unseen(), ready("r1", 0));
        assert_eq!(log.next_unseen(), ready("r2", 1));
        assert_eq!(log.next_unseen(), ready("r3", 2));
        assert_eq!(log.next_unseen(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_no_duplicate_delivery() {
        let mut log = ResponseLog::new(10);
        log.append("only");
        assert_eq!(log.next_unseen(), ready("only", 0));
        assert_eq!(log.next_unseen(), ReplyPoll::NoNew);
        assert_eq!(log.next_unseen(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_appends_interleaved_with_polls() {
        let mut log = ResponseLog::new(10);
        log.append("a");
        assert_eq!(log.next_unseen(), ready("a", 0));
        log.append("b");
        log.append("c");
        assert_eq!(log.next_unseen(), ready("b", 1));
        assert_eq!(log.next_unseen(), ready("c", 2));
        assert_eq!(log.next_unseen(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_sequence_survives_eviction() {
        let mut log = ResponseLog::new(2);
        assert_eq!(log.append("a"), 0);
        assert_eq!(log.append("b"), 1);
        assert_eq!(log.append("c"), 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.append("d"), 3);
    }

    #[test]
    fn test_cursor_skips_evicted_entries() {
        // capacity 2: after a, b, c the log holds [b, c]; "a" was evicted
        // before being read and is permanently lost.
        let mut log = ResponseLog::new(2);
        log.append("a");
        log.append("b");
        log.append("c");

        assert_eq!(log.next_unseen(), ready("b", 1));
        assert_eq!(log.next_unseen(), ready("c", 2));
        assert_eq!(log.next_unseen(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_evicted_reply_never_resurfaces() {
        let mut log = ResponseLog::new(2);
        log.append("old");
        assert_eq!(log.next_unseen(), ready("old", 0));

        log.append("x");
        log.append("y");
        log.append("z");
        // "x" (seq 1) was evicted while unread; delivery resumes at "y".
        assert_eq!(log.next_unseen(), ready("y", 2));
        assert_eq!(log.next_unseen(), ready("z", 3));
        assert_eq!(log.next_unseen(), ReplyPoll::NoNew);
    }

    #[test]
    fn test_capacity_bound_holds() {
        let mut log = ResponseLog::new(3);
        for i in 0..20 {
            log.append(format!("r{}", i));
            assert!(log.len() <= 3);
        }
    }
}
