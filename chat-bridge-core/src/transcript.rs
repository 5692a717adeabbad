//! Local transcript sink
//!
//! Persists every submitted message and received reply as JSONL for
//! audit, independent of the bounded in-memory reply log. One file per
//! day under the configured directory.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

use crate::utils::ensure_dir;

#[derive(Serialize)]
struct TranscriptRecord<'a> {
    role: &'a str,
    text: &'a str,
    timestamp: DateTime<Utc>,
}

/// Append-only JSONL transcript of submitted and received text
///
/// Write failures are logged and swallowed; the transcript never fails
/// a relay operation.
pub struct TranscriptWriter {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl TranscriptWriter {
    /// Create a writer appending under `dir`, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: ensure_dir(dir.into()),
            write_lock: Mutex::new(()),
        }
    }

    /// Record a message submitted by the producer
    pub fn record_sent(&self, text: &str) {
        self.record("user", text);
    }

    /// Record a reply received from the consumer
    pub fn record_received(&self, text: &str) {
        self.record("assistant", text);
    }

    /// Path of the file the next record would be appended to
    pub fn current_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.jsonl", Utc::now().format("%Y-%m-%d")))
    }

    fn record(&self, role: &str, text: &str) {
        let record = TranscriptRecord {
            role,
            text,
            timestamp: Utc::now(),
        };
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to serialize transcript record");
                return;
            }
        };

        let path = self.current_path();
        let _guard = self.write_lock.lock();
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{}", line));
        if let Err(e) = result {
            warn!(error = %e, path = %path.display(), "failed to append transcript record");
        }
    }
}
