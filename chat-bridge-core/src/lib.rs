//! Core relay logic for chat-bridge
//!
//! This crate provides the in-memory coordination at the heart of the
//! bridge: the pending-message queue, the bounded reply log with its
//! delivery cursor, the dedup guard, and the admission throttle, plus
//! the configuration, logging, and transcript plumbing shared by the
//! server and CLI crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod relay;
pub mod transcript;
pub mod utils;

pub use error::{Error, Result};
