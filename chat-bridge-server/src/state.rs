//! Shared application state

use std::sync::Arc;

use chat_bridge_core::config::{Config, EnvelopeConfig};
use chat_bridge_core::relay::{AdmissionThrottle, Relay};
use chat_bridge_core::transcript::TranscriptWriter;

/// Shared handles for request handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub throttle: Arc<AdmissionThrottle>,
    pub envelope: EnvelopeConfig,
    pub transcript: Option<Arc<TranscriptWriter>>,
}

impl AppState {
    /// Build state from a resolved configuration
    pub fn from_config(config: &Config) -> Self {
        let transcript = config
            .transcript
            .enabled
            .then(|| Arc::new(TranscriptWriter::new(&config.transcript.dir)));

        Self {
            relay: Arc::new(Relay::new(config.relay.max_responses)),
            throttle: Arc::new(AdmissionThrottle::from_config(&config.relay.throttle)),
            envelope: config.envelope.clone(),
            transcript,
        }
    }
}
