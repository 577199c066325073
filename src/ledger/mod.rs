//! Imperative shell around the election machine.
//!
//! A [`Ledger`] owns the store, feeds invocations to the pure machine one at
//! a time, commits accepted mutations and journals every outcome. Evaluation
//! and application are separate steps, so a caller can inspect a
//! [`Receipt`] before anything is written.

mod journal;

pub use journal::{Journal, Receipt};

use crate::config::MachineConfig;
use crate::machine::{CallContext, Decision, ElectionStateMachine, Invocation, Operation};
use crate::model::{AccountId, Round};
use crate::snapshot::{Snapshot, SnapshotError};
use crate::store::{MemoryStore, StateStore, StoreError};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Failures of the shell itself, as opposed to rejected invocations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("round {round} precedes last processed round {last}")]
    StaleRound { round: Round, last: Round },

    #[error("receipt sequence {found} does not match next sequence {expected}")]
    StaleReceipt { expected: u64, found: u64 },

    #[error("receipt was evaluated by another ledger")]
    ForeignReceipt,

    #[error("commit failed: {0}")]
    Commit(#[from] StoreError),
}

/// Sequential executor for one election.
///
/// # Example
///
/// ```rust
/// use electorate::config::MachineConfig;
/// use electorate::ledger::Ledger;
/// use electorate::machine::{CreateParams, Operation};
/// use electorate::model::AccountId;
///
/// let mut ledger = Ledger::in_memory(MachineConfig::default());
/// let creator = AccountId::new([1; 32]);
///
/// let create = Operation::Create(CreateParams {
///     end: 100,
///     num_options: 2,
///     option_labels: vec!["A".into(), "B".into()],
/// });
/// ledger.submit_operation(creator, 10, &create).unwrap().unwrap();
///
/// let result = ledger.submit_operation(creator, 11, &create).unwrap();
/// assert!(result.is_err());
/// assert_eq!(ledger.journal().rejected(), 1);
/// ```
pub struct Ledger<S: StateStore = MemoryStore> {
    id: Uuid,
    machine: ElectionStateMachine,
    store: S,
    journal: Journal,
    last_round: Option<Round>,
}

impl Ledger<MemoryStore> {
    pub fn in_memory(config: MachineConfig) -> Self {
        Self::new(ElectionStateMachine::new(config), MemoryStore::new())
    }

    /// Capture the current state. The journal is not part of a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.machine.config(), &self.store, self.last_round)
    }

    /// Rebuild a ledger from a snapshot, after validating it.
    pub fn restore(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let machine = ElectionStateMachine::new(snapshot.config.clone());
        let last_round = snapshot.round;
        let mut ledger = Self::new(machine, snapshot.into_store());
        ledger.last_round = last_round;
        info!(round = ?last_round, "ledger restored from snapshot");
        Ok(ledger)
    }
}

impl<S: StateStore> Ledger<S> {
    pub fn new(machine: ElectionStateMachine, store: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine,
            store,
            journal: Journal::new(),
            last_round: None,
        }
    }

    pub fn machine(&self) -> &ElectionStateMachine {
        &self.machine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn last_round(&self) -> Option<Round> {
        self.last_round
    }

    fn check_round(&self, round: Round) -> Result<(), LedgerError> {
        match self.last_round {
            Some(last) if round < last => Err(LedgerError::StaleRound { round, last }),
            _ => Ok(()),
        }
    }

    /// Decide an invocation against current state without writing (pure).
    pub fn evaluate(&self, invocation: &Invocation) -> Result<Receipt, LedgerError> {
        self.check_round(invocation.round)?;

        let decoded = invocation.decode();
        let operation = decoded.as_ref().ok().map(Operation::kind);
        let result = decoded.and_then(|op| {
            let ctx = CallContext::resolve(invocation.caller, invocation.round, &self.store);
            self.machine.execute(&ctx, &op, &self.store)
        });

        Ok(Receipt {
            ledger: self.id,
            sequence: self.journal.next_sequence(),
            round: invocation.round,
            caller: invocation.caller,
            operation,
            result,
        })
    }

    /// Commit a receipt produced by [`evaluate`](Self::evaluate).
    ///
    /// The receipt must come from this ledger and be the next one in
    /// sequence; anything else was evaluated against other state.
    pub fn apply(&mut self, receipt: Receipt) -> Result<(), LedgerError> {
        if receipt.ledger != self.id {
            return Err(LedgerError::ForeignReceipt);
        }
        self.check_round(receipt.round)?;
        let expected = self.journal.next_sequence();
        if receipt.sequence != expected {
            return Err(LedgerError::StaleReceipt {
                expected,
                found: receipt.sequence,
            });
        }

        match &receipt.result {
            Ok(mutations) => {
                self.store.commit(mutations)?;
                info!(
                    sequence = receipt.sequence,
                    round = receipt.round,
                    caller = %receipt.caller,
                    operation = receipt.operation.map(|k| k.name()),
                    writes = mutations.len(),
                    "invocation accepted"
                );
            }
            Err(error) => {
                warn!(
                    sequence = receipt.sequence,
                    round = receipt.round,
                    caller = %receipt.caller,
                    operation = receipt.operation.map(|k| k.name()),
                    kind = ?error.kind(),
                    %error,
                    "invocation rejected"
                );
            }
        }

        self.last_round = Some(receipt.round);
        self.journal.push(receipt);
        Ok(())
    }

    /// Evaluate and apply in one step.
    pub fn submit(&mut self, invocation: &Invocation) -> Result<Decision, LedgerError> {
        let receipt = self.evaluate(invocation)?;
        let result = receipt.result.clone();
        self.apply(receipt)?;
        Ok(result)
    }

    /// Encode a typed operation and submit it.
    pub fn submit_operation(
        &mut self,
        caller: AccountId,
        round: Round,
        operation: &Operation,
    ) -> Result<Decision, LedgerError> {
        self.submit(&Invocation::from_operation(caller, round, operation))
    }
}
