//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration for chat-bridge
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Relay core configuration
    #[serde(default)]
    pub relay: RelayConfig,
    /// Completion envelope configuration
    #[serde(default)]
    pub envelope: EnvelopeConfig,
    /// Transcript sink configuration
    #[serde(default)]
    pub transcript: TranscriptConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Relay core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Maximum replies kept in the response log
    #[serde(default = "default_max_responses")]
    pub max_responses: usize,
    /// Admission throttle settings
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

fn default_max_responses() -> usize {
    10
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_responses: default_max_responses(),
            throttle: ThrottleConfig::default(),
        }
    }
}

/// Admission throttle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Whether the gate is applied at all
    #[serde(default = "default_throttle_enabled")]
    pub enabled: bool,
    /// Minimum interval between admitted requests, in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_throttle_enabled() -> bool {
    true
}

fn default_min_interval_ms() -> u64 {
    1000
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            enabled: default_throttle_enabled(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

/// Completion envelope configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Model name stamped into completion envelopes
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "grok-1".to_string()
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

/// Transcript sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Whether submitted and received text is persisted
    #[serde(default)]
    pub enabled: bool,
    /// Directory for transcript files
    #[serde(default = "default_transcript_dir")]
    pub dir: String,
}

fn default_transcript_dir() -> String {
    "transcripts".to_string()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_transcript_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
        }
    }
}
