//! Error types.

use thiserror::Error;

/// Errors raised while reading or writing persisted widget state.
#[derive(Debug, Error)]
pub enum Error {
    /// The snapshot is not valid JSON or does not have the expected shape.
    #[error("malformed progress snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot is valid JSON but not an object.
    #[error("progress snapshot must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The snapshot was written by an incompatible version of the widget.
    #[error("unsupported progress snapshot version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build writes and reads.
        supported: u32,
    },

    /// The stored progress lies outside `0..=100`.
    #[error("persisted progress {0} is outside 0..=100")]
    ProgressOutOfRange(i64),
}

/// Result alias for persistence operations.
pub type Result<T> = std::result::Result<T, Error>;
