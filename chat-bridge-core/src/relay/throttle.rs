//! Global admission throttle

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::trace;

use crate::config::ThrottleConfig;

/// Global minimum-interval gate on request admission
///
/// All throttled callers share one timestamp, so a burst of requests is
/// serialized into the configured cadence. The gate is global, not
/// per-client, and it is the only place in the core that suspends the
/// calling task; every other relay operation returns immediately.
#[derive(Debug)]
pub struct AdmissionThrottle {
    min_interval: Duration,
    last_admitted: Mutex<Option<Instant>>,
    enabled: bool,
}

impl AdmissionThrottle {
    /// Create a gate enforcing `min_interval` between admissions
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_admitted: Mutex::new(None),
            enabled: true,
        }
    }

    /// Create a gate that admits immediately
    pub fn disabled() -> Self {
        Self {
            min_interval: Duration::ZERO,
            last_admitted: Mutex::new(None),
            enabled: false,
        }
    }

    /// Build a gate from configuration
    pub fn from_config(config: &ThrottleConfig) -> Self {
        if config.enabled {
            Self::new(Duration::from_millis(config.min_interval_ms))
        } else {
            Self::disabled()
        }
    }

    /// Wait until the minimum interval since the last admitted call has
    /// elapsed, then record the new admission. Holding the mutex across
    /// the sleep is what serializes concurrent callers.
    pub async fn throttle(&self) {
        if !self.enabled {
            return;
        }
        let mut last = self.last_admitted.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!(?wait, "throttling admission");
                sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}
