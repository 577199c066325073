//! Core eligibility types.
//!
//! This module contains the pure building blocks the election machine is
//! assembled from:
//! - State definitions via the `State` trait
//! - The voter eligibility lifecycle (`VoterStatus`)
//! - Guard predicates that gate administrative transitions
//!
//! Nothing in this module reads or writes storage.

mod guard;
mod state;
mod status;

pub use guard::Guard;
pub use state::State;
pub use status::VoterStatus;
