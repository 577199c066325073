//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while capturing or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot contents break an election invariant
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}
