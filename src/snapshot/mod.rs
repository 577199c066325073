//! Snapshot and restore of the complete election state.
//!
//! A snapshot carries the global record, every voter record and the machine
//! configuration, so a restored ledger decides exactly as the captured one
//! would have. JSON is the readable form; bincode the compact one.

use crate::config::MachineConfig;
use crate::core::VoterStatus;
use crate::model::{AccountId, Election, Round, VoterRecord};
use crate::store::MemoryStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One account's local record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterEntry {
    pub account: AccountId,
    pub record: VoterRecord,
}

/// Serializable image of an election store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// Last round processed before the capture
    pub round: Option<Round>,

    pub config: MachineConfig,

    pub election: Option<Election>,

    /// Voter records in account order
    pub voters: Vec<VoterEntry>,
}

impl Snapshot {
    pub fn capture(config: &MachineConfig, store: &MemoryStore, round: Option<Round>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            round,
            config: config.clone(),
            election: store.election_ref().cloned(),
            voters: store
                .voters()
                .map(|(account, record)| VoterEntry {
                    account: *account,
                    record: *record,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(raw)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Check every invariant a live store maintains.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.check_version()?;
        self.config
            .validate()
            .map_err(|e| SnapshotError::ValidationFailed(e.to_string()))?;

        let mut seen = BTreeSet::new();
        for entry in &self.voters {
            if !seen.insert(entry.account) {
                return Err(invalid(format!("duplicate voter {}", entry.account)));
            }
        }

        let Some(election) = &self.election else {
            if self.voters.is_empty() {
                return Ok(());
            }
            return Err(invalid("voter records without an election".to_string()));
        };

        if election.option_labels().is_empty() {
            return Err(invalid("election has no options".to_string()));
        }

        if election.tally().len() != election.option_labels().len() {
            return Err(invalid(format!(
                "tally has {} entries for {} options",
                election.tally().len(),
                election.option_labels().len()
            )));
        }

        let mut recorded = vec![0u64; election.tally().len()];
        for entry in &self.voters {
            if let Some(option) = entry.record.voted_option {
                if entry.record.status != VoterStatus::Approved {
                    return Err(invalid(format!(
                        "{} holds a vote while {}",
                        entry.account, entry.record.status
                    )));
                }
                let slot = recorded.get_mut(option as usize).ok_or_else(|| {
                    invalid(format!("{} voted for unknown option {}", entry.account, option))
                })?;
                *slot += 1;
            }
        }

        for (option, (counted, held)) in election.tally().iter().zip(&recorded).enumerate() {
            if counted < held {
                return Err(invalid(format!(
                    "option {} counts {} votes but {} records hold it",
                    option, counted, held
                )));
            }
        }

        let held: u64 = recorded.iter().sum();
        let expected = held.checked_add(election.retained_votes());
        if expected != Some(election.total_votes()) {
            return Err(invalid(format!(
                "tally sums to {} but {} records plus {} retained votes",
                election.total_votes(),
                held,
                election.retained_votes()
            )));
        }
        Ok(())
    }

    pub fn into_store(self) -> MemoryStore {
        MemoryStore::from_parts(
            self.election,
            self.voters.into_iter().map(|e| (e.account, e.record)),
        )
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

fn invalid(message: String) -> SnapshotError {
    SnapshotError::ValidationFailed(message)
}
