//! Rejection reasons produced by the election machine.

use crate::model::Round;
use crate::rules::ParamViolation;
use thiserror::Error;

/// Broad category of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count or out-of-range values.
    Argument,
    /// Caller lacks the role or approval the operation needs.
    Authorization,
    /// Operation attempted after the election ended.
    Temporal,
    /// Operation would break a once-only invariant.
    StateConflict,
    /// The invocation names no known operation.
    Unrecognized,
}

/// Why an invocation was rejected.
///
/// A rejection never carries another account's local state; the only values
/// embedded here are the caller's own inputs and public election fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ElectionError {
    #[error("{operation} expects {expected} arguments, got {found}")]
    WrongArgumentCount {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("argument {position} is malformed: {reason}")]
    MalformedArgument { position: usize, reason: String },

    #[error("invalid election parameters: {}", join_violations(.violations))]
    InvalidParameters { violations: Vec<ParamViolation> },

    #[error("option {option} is out of range (election has {num_options} options)")]
    OptionOutOfRange { option: u64, num_options: u32 },

    #[error("'{0}' is not an assignable voter status")]
    InvalidStatus(String),

    #[error("election end overflows: round {round} + duration {duration}")]
    DeadlineOverflow { round: Round, duration: u64 },

    #[error("only the election creator may {action}")]
    NotCreator { action: &'static str },

    #[error("caller was denied the right to vote")]
    NotEligible,

    #[error("election ended at round {election_end} (current round {round})")]
    ElectionClosed { round: Round, election_end: Round },

    #[error("election already exists")]
    AlreadyCreated,

    #[error("no election has been created")]
    NotCreated,

    #[error("caller is already registered")]
    AlreadyRegistered,

    #[error("caller is not registered")]
    NotRegistered,

    #[error("caller is awaiting approval")]
    AwaitingApproval,

    #[error("already voted")]
    AlreadyVoted,

    #[error("target account is not registered")]
    TargetNotRegistered,

    #[error("target account status was already decided")]
    StatusAlreadyDecided,

    #[error("unrecognized action '{tag}'")]
    UnrecognizedAction { tag: String },
}

impl ElectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongArgumentCount { .. }
            | Self::MalformedArgument { .. }
            | Self::InvalidParameters { .. }
            | Self::OptionOutOfRange { .. }
            | Self::InvalidStatus(_)
            | Self::DeadlineOverflow { .. } => ErrorKind::Argument,
            Self::NotCreator { .. } | Self::NotEligible => ErrorKind::Authorization,
            Self::ElectionClosed { .. } => ErrorKind::Temporal,
            Self::AlreadyCreated
            | Self::NotCreated
            | Self::AlreadyRegistered
            | Self::NotRegistered
            | Self::AwaitingApproval
            | Self::AlreadyVoted
            | Self::TargetNotRegistered
            | Self::StatusAlreadyDecided => ErrorKind::StateConflict,
            Self::UnrecognizedAction { .. } => ErrorKind::Unrecognized,
        }
    }
}

fn join_violations(violations: &[ParamViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(ElectionError::AlreadyVoted.kind(), ErrorKind::StateConflict);
        assert_eq!(
            ElectionError::NotCreator { action: "vote" }.kind(),
            ErrorKind::Authorization
        );
        assert_eq!(
            ElectionError::ElectionClosed {
                round: 2,
                election_end: 1
            }
            .kind(),
            ErrorKind::Temporal
        );
        assert_eq!(
            ElectionError::OptionOutOfRange {
                option: 4,
                num_options: 2
            }
            .kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            ElectionError::UnrecognizedAction { tag: "x".into() }.kind(),
            ErrorKind::Unrecognized
        );
    }

    #[test]
    fn parameter_violations_are_joined() {
        let err = ElectionError::InvalidParameters {
            violations: vec![
                ParamViolation::NoOptions,
                ParamViolation::EmptyLabel { index: 1 },
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid election parameters: election needs at least one option; label 1 is empty"
        );
    }

    #[test]
    fn already_voted_message() {
        assert_eq!(ElectionError::AlreadyVoted.to_string(), "already voted");
    }
}
