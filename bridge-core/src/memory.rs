//! In-memory queue and offset store for testing.
//!
//! These mirror the file-backed implementations without touching the
//! filesystem, and can inject failures to exercise tick-level error
//! recovery.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::offset::OffsetStore;
use crate::queue::IntentQueue;

/// In-memory implementation of [`OffsetStore`] for testing.
#[derive(Debug, Default)]
pub struct InMemoryOffsetStore {
    value: Mutex<u64>,
    fail_saves: AtomicBool,
}

impl InMemoryOffsetStore {
    /// Create a store committed at offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store committed at `value`.
    #[must_use]
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Mutex::new(value),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make subsequent `save` calls fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Get the committed value.
    pub async fn value(&self) -> u64 {
        *self.value.lock().await
    }
}

#[async_trait]
impl OffsetStore for InMemoryOffsetStore {
    async fn ensure(&self) -> Result<()> {
        Ok(())
    }

    async fn load(&self) -> u64 {
        *self.value.lock().await
    }

    async fn save(&self, value: u64) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::OffsetWrite {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("injected save failure"),
            });
        }
        *self.value.lock().await = value;
        Ok(())
    }
}

/// In-memory implementation of [`IntentQueue`] for testing.
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    lines: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
}

impl InMemoryQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, the way an external producer would.
    pub async fn append(&self, line: impl Into<String>) {
        self.lines.lock().await.push(line.into());
    }

    /// Make subsequent `read_lines` calls fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Get the number of lines in the queue.
    pub async fn len(&self) -> usize {
        self.lines.lock().await.len()
    }

    /// Check if the queue is empty.
    pub async fn is_empty(&self) -> bool {
        self.lines.lock().await.is_empty()
    }
}

#[async_trait]
impl IntentQueue for InMemoryQueue {
    async fn ensure(&self) -> Result<()> {
        Ok(())
    }

    async fn read_lines(&self) -> Result<Vec<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::QueueRead {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("injected read failure"),
            });
        }
        Ok(self.lines.lock().await.clone())
    }
}
