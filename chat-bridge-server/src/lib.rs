//! HTTP transport for the chat-bridge relay
//!
//! Maps the relay's four logical operations onto REST endpoints, shaping
//! consumer-facing payloads as chat-completion envelopes.

pub mod envelope;
pub mod handlers;
pub mod server;
pub mod state;

pub use server::{router, run_server};
pub use state::AppState;
