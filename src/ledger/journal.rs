//! Append-only record of processed invocations.

use crate::error::ElectionError;
use crate::machine::{Decision, Mutation, OperationKind};
use crate::model::{AccountId, Round};
use uuid::Uuid;

/// Outcome of one invocation, accepted or rejected.
///
/// Only [`Ledger::evaluate`](super::Ledger::evaluate) builds receipts, so a
/// committed receipt always carries the machine's own decision.
///
/// ```compile_fail
/// use electorate::ledger::Receipt;
/// use electorate::model::AccountId;
///
/// let receipt = Receipt {
///     sequence: 0,
///     round: 1,
///     caller: AccountId::new([1; 32]),
///     operation: None,
///     result: Ok(Vec::new()),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Ledger that evaluated this receipt.
    pub(crate) ledger: Uuid,
    pub(crate) sequence: u64,
    pub(crate) round: Round,
    pub(crate) caller: AccountId,
    pub(crate) operation: Option<OperationKind>,
    pub(crate) result: Decision,
}

impl Receipt {
    /// Position in the journal, starting at zero.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn caller(&self) -> &AccountId {
        &self.caller
    }

    /// `None` when the invocation could not be decoded.
    pub fn operation(&self) -> Option<OperationKind> {
        self.operation
    }

    pub fn result(&self) -> &Decision {
        &self.result
    }

    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }

    /// Writes committed by this invocation; empty when rejected.
    pub fn mutations(&self) -> &[Mutation] {
        match &self.result {
            Ok(mutations) => mutations,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&ElectionError> {
        self.result.as_ref().err()
    }
}

/// Ordered history of receipts.
///
/// `record` returns a new journal with the receipt appended and leaves the
/// original untouched. The ledger appends in place.
///
/// # Example
///
/// ```rust
/// use electorate::config::MachineConfig;
/// use electorate::ledger::{Journal, Ledger};
/// use electorate::machine::{Completion, Invocation};
/// use electorate::model::AccountId;
///
/// let ledger = Ledger::in_memory(MachineConfig::default());
/// let caller = AccountId::new([1; 32]);
/// let receipt = ledger
///     .evaluate(&Invocation::new(caller, 5, Completion::OptIn))
///     .unwrap();
///
/// let journal = Journal::new();
/// let next = journal.record(receipt);
/// assert_eq!(next.len(), 1);
/// assert_eq!(next.rejected(), 1);
/// assert_eq!(journal.len(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    receipts: Vec<Receipt>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a receipt, returning a new journal.
    pub fn record(&self, receipt: Receipt) -> Self {
        let mut receipts = self.receipts.clone();
        receipts.push(receipt);
        Self { receipts }
    }

    pub(crate) fn push(&mut self, receipt: Receipt) {
        self.receipts.push(receipt);
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    /// Sequence number the next receipt must carry.
    pub fn next_sequence(&self) -> u64 {
        self.receipts.len() as u64
    }

    pub fn accepted(&self) -> usize {
        self.receipts.iter().filter(|r| r.is_accepted()).count()
    }

    pub fn rejected(&self) -> usize {
        self.len() - self.accepted()
    }

    /// First and last round seen, if any.
    pub fn round_span(&self) -> Option<(Round, Round)> {
        let first = self.receipts.first()?.round;
        let last = self.receipts.last()?.round;
        Some((first, last))
    }

    /// Receipts submitted by one account, in order.
    pub fn by_caller<'a>(&'a self, caller: &'a AccountId) -> impl Iterator<Item = &'a Receipt> {
        self.receipts.iter().filter(move |r| &r.caller == caller)
    }
}
