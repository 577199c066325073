//! Guard predicates for controlling lifecycle transitions.
//!
//! Guards are pure boolean functions over a lifecycle state. The election
//! machine holds one per gated path (administrative decision, ballot casting).

use super::state::State;
use std::fmt;
use std::marker::PhantomData;

/// Named pure predicate that determines if a transition can proceed.
///
/// # Example
///
/// ```rust
/// use electorate::core::{Guard, VoterStatus};
///
/// let undecided = Guard::new("undecided", |s: &VoterStatus| *s == VoterStatus::Pending);
///
/// assert!(undecided.check(&VoterStatus::Pending));
/// assert!(!undecided.check(&VoterStatus::Approved));
/// assert_eq!(undecided.name(), "undecided");
/// ```
pub struct Guard<S: State> {
    name: &'static str,
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic: every replica evaluates it
    /// against the same state and must reach the same answer.
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            name,
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Guard that passes only for one exact state.
    pub fn exactly(name: &'static str, expected: S) -> Self
    where
        S: 'static,
    {
        Self::new(name, move |s| *s == expected)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the guard allows a transition out of this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}
