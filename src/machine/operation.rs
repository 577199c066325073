//! Typed operations accepted by the election machine.

use crate::core::VoterStatus;
use crate::model::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arguments of `Create`, before any validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParams {
    /// Absolute end round or duration, depending on `DeadlineMode`.
    pub end: u64,
    pub num_options: u64,
    pub option_labels: Vec<String>,
}

/// One operation per invocation. Matching is always exhaustive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create(CreateParams),
    /// Opt-in.
    Register,
    UpdateVoterStatus {
        target: AccountId,
        status: VoterStatus,
    },
    Vote {
        option: u64,
    },
    CloseOut,
    ClearState,
    /// Creator-only teardown of the deployed logic.
    Delete,
    /// Creator-only replacement of the deployed logic.
    Update,
}

/// Name of an operation without its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    Register,
    UpdateVoterStatus,
    Vote,
    CloseOut,
    ClearState,
    Delete,
    Update,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Create(_) => OperationKind::Create,
            Self::Register => OperationKind::Register,
            Self::UpdateVoterStatus { .. } => OperationKind::UpdateVoterStatus,
            Self::Vote { .. } => OperationKind::Vote,
            Self::CloseOut => OperationKind::CloseOut,
            Self::ClearState => OperationKind::ClearState,
            Self::Delete => OperationKind::Delete,
            Self::Update => OperationKind::Update,
        }
    }
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Register => "register",
            Self::UpdateVoterStatus => "update_user_status",
            Self::Vote => "vote",
            Self::CloseOut => "close_out",
            Self::ClearState => "clear_state",
            Self::Delete => "delete",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
