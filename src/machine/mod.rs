//! The election state machine.
//!
//! - [`Operation`]: typed operations, one per invocation
//! - [`Invocation`]: the raw boundary form and its decoder
//! - [`Mutation`]: writes an accepted operation asks the store to commit
//! - [`ElectionStateMachine`]: the pure decision procedure
//!
//! The machine never touches storage directly. It reads through
//! [`StateView`](crate::store::StateView) and returns mutations; committing
//! them is the caller's job.

mod codec;
mod machine;
mod mutation;
mod operation;

pub use codec::{encode_labels, encode_u64, Completion, Invocation, UPDATE_STATUS_TAG, VOTE_TAG};
pub use machine::{CallContext, Decision, ElectionStateMachine};
pub use mutation::Mutation;
pub use operation::{CreateParams, Operation, OperationKind};
