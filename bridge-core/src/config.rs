//! Configuration for the tail consumer.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default file name of the intent queue.
pub const QUEUE_FILE: &str = "oram_intent_queue.jsonl";

/// Default file name of the offset sidecar.
pub const OFFSET_FILE: &str = "oram_intent_consumer.offset";

/// Configuration for the tail consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Path to the append-only intent queue file.
    #[serde(default = "default_queue_path")]
    pub queue_path: PathBuf,

    /// Path to the offset sidecar file.
    #[serde(default = "default_offset_path")]
    pub offset_path: PathBuf,

    /// Interval between poll ticks.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

fn default_queue_path() -> PathBuf {
    bridge_paths::data_dir().join(QUEUE_FILE)
}

fn default_offset_path() -> PathBuf {
    bridge_paths::data_dir().join(OFFSET_FILE)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(2)
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            queue_path: default_queue_path(),
            offset_path: default_offset_path(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl ConsumerConfig {
    /// Create a config with both files under `dir`, using the default
    /// file names.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            queue_path: dir.join(QUEUE_FILE),
            offset_path: dir.join(OFFSET_FILE),
            poll_interval: default_poll_interval(),
        }
    }

    /// Create a config with a custom queue path.
    #[must_use]
    pub fn with_queue_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.queue_path = path.into();
        self
    }

    /// Create a config with a custom offset sidecar path.
    #[must_use]
    pub fn with_offset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.offset_path = path.into();
        self
    }

    /// Create a config with a custom poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
