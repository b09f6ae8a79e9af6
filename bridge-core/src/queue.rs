//! The append-only intent queue file.
//!
//! External producers append JSON-lines events to the queue; this
//! system only reads it (and creates it empty on first run).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Source of intent-queue lines.
#[async_trait]
pub trait IntentQueue: Send + Sync {
    /// Guarantee the queue exists, creating it empty if absent. Must
    /// never truncate existing content.
    async fn ensure(&self) -> Result<()>;

    /// Read every line of the queue, in file order.
    ///
    /// The whole queue is re-read on every call: trivially correct
    /// against external appends, but O(file size) per tick. Fine while
    /// the queue stays small; a seek-based cursor would be the upgrade
    /// path if it ever isn't.
    async fn read_lines(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<T> IntentQueue for std::sync::Arc<T>
where
    T: IntentQueue + ?Sized,
{
    async fn ensure(&self) -> Result<()> {
        (**self).ensure().await
    }

    async fn read_lines(&self) -> Result<Vec<String>> {
        (**self).read_lines().await
    }
}

/// Intent queue backed by a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonlQueue {
    path: PathBuf,
}

impl JsonlQueue {
    /// Create a queue handle for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the queue file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IntentQueue for JsonlQueue {
    async fn ensure(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Setup {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        // Open in append mode so an existing queue is never truncated.
        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::Setup {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }

    async fn read_lines(&self) -> Result<Vec<String>> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| Error::QueueRead {
                    path: self.path.clone(),
                    source: e,
                })?;

        Ok(contents.lines().map(str::to_owned).collect())
    }
}
