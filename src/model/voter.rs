use super::OptionIndex;
use crate::core::VoterStatus;
use serde::{Deserialize, Serialize};

/// Per-account participation record.
///
/// Records are values: the `with_*` methods return a changed copy and leave
/// the original untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub status: VoterStatus,
    pub voted_option: Option<OptionIndex>,
}

impl VoterRecord {
    /// Fresh record produced by registration.
    pub fn registered() -> Self {
        Self {
            status: VoterStatus::Pending,
            voted_option: None,
        }
    }

    pub fn has_voted(&self) -> bool {
        self.voted_option.is_some()
    }

    pub fn with_status(self, status: VoterStatus) -> Self {
        Self { status, ..self }
    }

    pub fn with_vote(self, option: OptionIndex) -> Self {
        Self {
            voted_option: Some(option),
            ..self
        }
    }

    pub fn without_vote(self) -> Self {
        Self {
            voted_option: None,
            ..self
        }
    }
}
