//! Violations of the creation parameter rules.

use thiserror::Error;

/// A single broken creation rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamViolation {
    #[error("election needs at least one option")]
    NoOptions,

    #[error("{found} options exceed the limit of {max}")]
    TooManyOptions { max: u32, found: u64 },

    #[error("expected {expected} labels, got {found}")]
    LabelCountMismatch { expected: u64, found: usize },

    #[error("label {index} is empty")]
    EmptyLabel { index: usize },

    #[error("label {index} is {len} bytes (limit {max})")]
    LabelTooLong { index: usize, len: usize, max: usize },

    #[error("label '{label}' appears more than once")]
    DuplicateLabel { label: String },

    #[error("custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
