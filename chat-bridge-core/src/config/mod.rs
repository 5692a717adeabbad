//! Configuration management

pub mod loader;
pub mod schema;
pub mod validate;

pub use loader::ConfigLoader;
pub use schema::{
    Config, EnvelopeConfig, LoggingConfig, RelayConfig, ServerConfig, ThrottleConfig,
    TranscriptConfig,
};
