use super::{StateStore, StateView, StoreError};
use crate::machine::Mutation;
use crate::model::{AccountId, Election, VoterRecord};
use std::collections::BTreeMap;

/// In-memory store, ordered by account for deterministic iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    election: Option<Election>,
    voters: BTreeMap<AccountId, VoterRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        election: Option<Election>,
        voters: impl IntoIterator<Item = (AccountId, VoterRecord)>,
    ) -> Self {
        Self {
            election,
            voters: voters.into_iter().collect(),
        }
    }

    pub fn election_ref(&self) -> Option<&Election> {
        self.election.as_ref()
    }

    /// Every local record, in account order.
    pub fn voters(&self) -> impl Iterator<Item = (&AccountId, &VoterRecord)> {
        self.voters.iter()
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Number of records currently holding a vote.
    pub fn recorded_votes(&self) -> u64 {
        self.voters.values().filter(|r| r.has_voted()).count() as u64
    }

    fn apply(&mut self, mutation: &Mutation) -> Result<(), StoreError> {
        match mutation {
            Mutation::CreateElection(election) => {
                if self.election.is_some() {
                    return Err(StoreError::ElectionExists);
                }
                self.election = Some(election.clone());
            }
            Mutation::SetTally { option, votes } => {
                let election = self.election.as_mut().ok_or(StoreError::MissingElection)?;
                if !election.set_tally(*option, *votes) {
                    return Err(StoreError::UnknownOption(*option));
                }
            }
            Mutation::SetRetainedVotes(votes) => {
                let election = self.election.as_mut().ok_or(StoreError::MissingElection)?;
                election.set_retained_votes(*votes);
            }
            Mutation::PutVoter { account, record } => {
                self.voters.insert(*account, *record);
            }
            Mutation::RemoveVoter { account } => {
                self.voters.remove(account);
            }
        }
        Ok(())
    }
}

impl StateView for MemoryStore {
    fn election(&self) -> Option<Election> {
        self.election.clone()
    }

    fn voter(&self, account: &AccountId) -> Option<VoterRecord> {
        self.voters.get(account).copied()
    }
}

impl StateStore for MemoryStore {
    fn commit(&mut self, mutations: &[Mutation]) -> Result<(), StoreError> {
        let mut staged = self.clone();
        for mutation in mutations {
            staged.apply(mutation)?;
        }
        *self = staged;
        Ok(())
    }
}
