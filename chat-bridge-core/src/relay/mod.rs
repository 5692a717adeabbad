//! In-memory relay coordination
//!
//! Producer messages flow through the dedup guard into the pending queue
//! and are dequeued once by the consumer; consumer replies flow into the
//! bounded response log and are handed to the producer strictly in order
//! through a single shared cursor.

pub mod coordinator;
pub mod dedup;
pub mod log;
pub mod message;
pub mod queue;
pub mod throttle;

pub use coordinator::Relay;
pub use log::{ReplyPoll, ResponseLog};
pub use message::{Message, ResponseEntry};
pub use throttle::AdmissionThrottle;
