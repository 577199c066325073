//! Core State trait for lifecycle values.
//!
//! Lifecycle values (such as a voter's eligibility) implement this trait so
//! guards, logs and rejections can inspect them uniformly.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states tracked by the election.
///
/// All methods are pure. A state is an immutable value describing where an
/// account currently sits in its lifecycle.
///
/// # Required Traits
///
/// - `Clone` + `PartialEq`: states are compared by guards
/// - `Debug`: states appear in diagnostics
/// - `Serialize` + `Deserialize`: states are persisted in snapshots
///
/// # Example
///
/// ```rust
/// use electorate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Ballot {
///     Blank,
///     Cast,
///     Spoiled,
/// }
///
/// impl State for Ballot {
///     fn name(&self) -> &str {
///         match self {
///             Self::Blank => "Blank",
///             Self::Cast => "Cast",
///             Self::Spoiled => "Spoiled",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Cast | Self::Spoiled)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Spoiled)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final state.
    ///
    /// Final states accept no further administrative transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this state denies the account its privileges.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
