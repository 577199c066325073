//! Electorate: a deterministic election tally state machine
//!
//! Electorate follows the "pure core, imperative shell" philosophy. The
//! election rules are pure functions from (caller, round, operation, state)
//! to a list of mutations; a thin ledger shell commits those mutations
//! atomically and journals every outcome. Replicas fed the same invocations
//! in the same order reach identical state.
//!
//! # Core Concepts
//!
//! - **Election**: global record holding the creator, deadline, options and tally
//! - **Voter records**: per-account eligibility and at most one counted vote
//! - **Operations**: Create, Register, UpdateVoterStatus, Vote, CloseOut,
//!   ClearState, and creator-only Delete/Update
//! - **Ledger**: sequential executor with an immutable journal and snapshots
//!
//! # Example
//!
//! ```rust
//! use electorate::config::MachineConfig;
//! use electorate::core::VoterStatus;
//! use electorate::ledger::Ledger;
//! use electorate::machine::{CreateParams, Operation};
//! use electorate::model::AccountId;
//! use electorate::store::StateView;
//!
//! let creator = AccountId::new([1; 32]);
//! let voter = AccountId::new([2; 32]);
//! let mut ledger = Ledger::in_memory(MachineConfig::default());
//!
//! let create = Operation::Create(CreateParams {
//!     end: 100,
//!     num_options: 3,
//!     option_labels: vec!["A".into(), "B".into(), "C".into()],
//! });
//! ledger.submit_operation(creator, 10, &create).unwrap().unwrap();
//! ledger.submit_operation(voter, 20, &Operation::Register).unwrap().unwrap();
//!
//! let approve = Operation::UpdateVoterStatus { target: voter, status: VoterStatus::Approved };
//! ledger.submit_operation(creator, 21, &approve).unwrap().unwrap();
//! ledger.submit_operation(voter, 22, &Operation::Vote { option: 1 }).unwrap().unwrap();
//!
//! let election = ledger.store().election().unwrap();
//! assert_eq!(election.tally(), &[0, 1, 0]);
//! assert_eq!(election.leader().unwrap().label, "B");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod ledger;
pub mod machine;
pub mod model;
pub mod rules;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use crate::config::{DeadlineMode, MachineConfig};
pub use crate::core::{Guard, State, VoterStatus};
pub use crate::error::{ElectionError, ErrorKind};
pub use crate::ledger::{Journal, Ledger, LedgerError, Receipt};
pub use crate::machine::{ElectionStateMachine, Invocation, Mutation, Operation};
pub use crate::model::{AccountId, Election, VoterRecord};
pub use crate::store::{MemoryStore, StateStore, StateView};
