//! Durable read-position tracking for the intent queue.
//!
//! The offset is the count of queue lines already consumed, persisted
//! as a decimal string in a sidecar file so a restarted consumer
//! resumes where the previous run committed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::error::{Error, Result};

/// Persists and retrieves the committed read position.
#[async_trait]
pub trait OffsetStore: Send + Sync {
    /// Guarantee the backing store exists, initializing it to `0` if
    /// absent.
    async fn ensure(&self) -> Result<()>;

    /// Read the committed offset.
    ///
    /// Missing, unreadable, empty, or non-numeric content yields `0`:
    /// the consumer re-reads the queue from the start rather than
    /// failing, which may reprocess already-seen lines. Acceptable
    /// under at-least-once delivery.
    async fn load(&self) -> u64;

    /// Overwrite the committed offset with `value`.
    async fn save(&self, value: u64) -> Result<()>;
}

#[async_trait]
impl<T> OffsetStore for std::sync::Arc<T>
where
    T: OffsetStore + ?Sized,
{
    async fn ensure(&self) -> Result<()> {
        (**self).ensure().await
    }

    async fn load(&self) -> u64 {
        (**self).load().await
    }

    async fn save(&self, value: u64) -> Result<()> {
        (**self).save(value).await
    }
}

/// Offset store backed by a plain-text sidecar file.
#[derive(Debug, Clone)]
pub struct FileOffsetStore {
    path: PathBuf,
}

impl FileOffsetStore {
    /// Create an offset store at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the sidecar file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OffsetStore for FileOffsetStore {
    async fn ensure(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Setup {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        if !self.path.exists() {
            tokio::fs::write(&self.path, b"0")
                .await
                .map_err(|e| Error::Setup {
                    path: self.path.clone(),
                    source: e,
                })?;
        }

        Ok(())
    }

    async fn load(&self) -> u64 {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "offset file unreadable, restarting from 0"
                    );
                }
                return 0;
            }
        };

        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return 0;
        }

        match trimmed.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    path = %self.path.display(),
                    content = trimmed,
                    "offset file is not a number, restarting from 0"
                );
                0
            }
        }
    }

    async fn save(&self, value: u64) -> Result<()> {
        // Full overwrite, never an append.
        tokio::fs::write(&self.path, value.to_string())
            .await
            .map_err(|e| Error::OffsetWrite {
                path: self.path.clone(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileOffsetStore {
        FileOffsetStore::new(dir.path().join("consumer.offset"))
    }

    #[tokio::test]
    async fn ensure_creates_file_with_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.ensure().await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "0");
    }

    #[tokio::test]
    async fn ensure_leaves_existing_value_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "17").unwrap();

        store.ensure().await.unwrap();

        assert_eq!(store.load().await, 17);
    }

    #[tokio::test]
    async fn ensure_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileOffsetStore::new(dir.path().join("nested").join("deep").join("x.offset"));

        store.ensure().await.unwrap();

        assert_eq!(store.load().await, 0);
    }

    #[tokio::test]
    async fn load_missing_file_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().await, 0);
    }

    #[tokio::test]
    async fn load_empty_file_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "").unwrap();

        assert_eq!(store.load().await, 0);
    }

    #[tokio::test]
    async fn load_garbage_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not-a-number").unwrap();

        assert_eq!(store.load().await, 0);
    }

    #[tokio::test]
    async fn load_tolerates_surrounding_whitespace() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "  42\n").unwrap();

        assert_eq!(store.load().await, 42);
    }

    #[tokio::test]
    async fn save_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(123).await.unwrap();

        assert_eq!(store.load().await, 123);
    }

    #[tokio::test]
    async fn save_replaces_prior_content_entirely() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(1000).await.unwrap();
        store.save(7).await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "7");
    }
}
