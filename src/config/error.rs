//! Configuration errors.

use thiserror::Error;

/// Errors that can occur when building or loading a `MachineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_options must be at least 1")]
    ZeroMaxOptions,

    #[error("max_label_len must be at least 1")]
    ZeroLabelLength,

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
