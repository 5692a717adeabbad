//! Error types for chat-bridge

use thiserror::Error;

/// The main error type for chat-bridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Empty or missing input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The relay has already accepted an identical message body
    #[error("Message already processed")]
    DuplicateMessage,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized Result type for chat-bridge operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
