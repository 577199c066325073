//! Parameter rules for election creation.
//!
//! Creation parameters are checked with Stillwater's `Validation` so a bad
//! `Create` reports every problem at once instead of the first one found.
//!
//! # Example
//!
//! ```rust
//! use electorate::config::MachineConfig;
//! use electorate::machine::CreateParams;
//! use electorate::rules::ParamRules;
//!
//! let rules = ParamRules::from_config(&MachineConfig::default());
//! let params = CreateParams {
//!     end: 100,
//!     num_options: 3,
//!     option_labels: vec!["A".into(), "".into()],
//! };
//!
//! // Both the count mismatch and the empty label are reported.
//! assert!(rules.enforce(&params).is_failure());
//! ```

pub mod params;
pub mod violations;

pub use params::{ParamCheck, ParamRules};
pub use violations::ParamViolation;
