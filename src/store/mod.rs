//! State access contracts.
//!
//! The machine reads through [`StateView`] and never writes. Writes reach a
//! [`StateStore`] only as a complete batch of [`Mutation`]s, which the store
//! must apply all-or-nothing.

mod memory;

pub use memory::MemoryStore;

use crate::machine::Mutation;
use crate::model::{AccountId, Election, OptionIndex, Round, VoterRecord};
use thiserror::Error;

/// Read access to global and per-account state.
pub trait StateView {
    /// The global election record, if one was created.
    fn election(&self) -> Option<Election>;

    /// The local record of one account.
    fn voter(&self, account: &AccountId) -> Option<VoterRecord>;
}

/// Writable state, committed one invocation at a time.
pub trait StateStore: StateView {
    /// Apply every mutation, or none of them.
    fn commit(&mut self, mutations: &[Mutation]) -> Result<(), StoreError>;
}

/// Who is calling, who owns the election, and when.
pub trait IdentityContext {
    fn caller_account(&self) -> &AccountId;

    /// `None` until an election exists.
    fn creator_account(&self) -> Option<&AccountId>;

    fn current_round(&self) -> Round;
}

/// Errors raised while committing a batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("election already exists")]
    ElectionExists,

    #[error("no election to update")]
    MissingElection,

    #[error("tally has no option {0}")]
    UnknownOption(OptionIndex),
}
