//! Typed election state.
//!
//! `Election` is the single global record; `VoterRecord` is the per-account
//! local record. Both are plain values: the machine never mutates them in
//! place, it emits [`Mutation`](crate::machine::Mutation)s that a store applies.

mod account;
mod election;
mod voter;

pub use account::AccountId;
pub use election::{Election, OptionResult};
pub use voter::VoterRecord;

/// Logical clock supplied by the ledger for each invocation.
pub type Round = u64;

/// Zero-based index into an election's option list.
pub type OptionIndex = u32;
