//! Error types for the bridge consumer.

use std::path::PathBuf;

/// Error type for consumer operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or its parent directory could not be created at startup.
    #[error("failed to prepare {path}: {source}")]
    Setup {
        /// The path that could not be created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The intent queue could not be read.
    #[error("failed to read intent queue {path}: {source}")]
    QueueRead {
        /// Path of the queue file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The offset sidecar could not be written.
    #[error("failed to write offset file {path}: {source}")]
    OffsetWrite {
        /// Path of the offset sidecar.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for consumer operations.
pub type Result<T> = std::result::Result<T, Error>;
