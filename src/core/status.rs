//! Voter eligibility lifecycle.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Eligibility of a registered account.
///
/// An account with no record at all is "unset". Registration always yields
/// `Pending`; the creator then decides once, moving it to `Approved` or
/// `Denied`. Both decisions are final.
///
/// On the wire the three values travel as `"maybe"`, `"yes"` and `"no"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterStatus {
    Pending,
    Approved,
    Denied,
}

impl VoterStatus {
    /// Parse the wire form of a status.
    pub fn from_wire(raw: &[u8]) -> Option<Self> {
        match raw {
            b"maybe" => Some(Self::Pending),
            b"yes" => Some(Self::Approved),
            b"no" => Some(Self::Denied),
            _ => None,
        }
    }

    /// Wire form of this status.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Pending => "maybe",
            Self::Approved => "yes",
            Self::Denied => "no",
        }
    }

    /// True for the two values the creator may assign.
    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }
}

impl State for VoterStatus {
    fn name(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }

    fn is_final(&self) -> bool {
        self.is_decision()
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Denied)
    }
}

impl fmt::Display for VoterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_forms_parse() {
        assert_eq!(VoterStatus::from_wire(b"maybe"), Some(VoterStatus::Pending));
        assert_eq!(VoterStatus::from_wire(b"yes"), Some(VoterStatus::Approved));
        assert_eq!(VoterStatus::from_wire(b"no"), Some(VoterStatus::Denied));
        assert_eq!(VoterStatus::from_wire(b"YES"), None);
        assert_eq!(VoterStatus::from_wire(b""), None);
    }

    #[test]
    fn wire_form_matches_parse() {
        for status in [
            VoterStatus::Pending,
            VoterStatus::Approved,
            VoterStatus::Denied,
        ] {
            assert_eq!(
                VoterStatus::from_wire(status.as_wire().as_bytes()),
                Some(status)
            );
        }
    }

    #[test]
    fn only_decisions_are_final() {
        assert!(!VoterStatus::Pending.is_final());
        assert!(VoterStatus::Approved.is_final());
        assert!(VoterStatus::Denied.is_final());
        assert!(VoterStatus::Denied.is_error());
        assert!(!VoterStatus::Approved.is_error());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&VoterStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
