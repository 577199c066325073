//! Machine configuration.
//!
//! Settings that a deployment fixes before the first `Create`: how the
//! deadline argument is interpreted and the schema limits for options.
//! Configuration is passed explicitly to the machine; nothing is compiled in.
//!
//! # Example
//!
//! ```rust
//! use electorate::config::{DeadlineMode, MachineConfig};
//!
//! let config = MachineConfig::from_json(r#"{ "deadline": "relative" }"#).unwrap();
//! assert_eq!(config.deadline, DeadlineMode::Relative);
//! assert_eq!(config.max_options, MachineConfig::default().max_options);
//! ```

pub mod builder;
pub mod error;

pub use builder::MachineConfigBuilder;
pub use error::ConfigError;

use serde::{Deserialize, Serialize};

/// Default ceiling on options per election.
pub const DEFAULT_MAX_OPTIONS: u32 = 60;

/// Default ceiling on option label length in bytes.
pub const DEFAULT_MAX_LABEL_LEN: usize = 64;

/// How the first `Create` argument becomes `election_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineMode {
    /// The argument is the last round on which the election is open.
    #[default]
    Absolute,
    /// The argument is a duration added to the creation round.
    Relative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub deadline: DeadlineMode,
    pub max_options: u32,
    pub max_label_len: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            deadline: DeadlineMode::Absolute,
            max_options: DEFAULT_MAX_OPTIONS,
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

impl MachineConfig {
    pub fn builder() -> MachineConfigBuilder {
        MachineConfigBuilder::new()
    }

    /// Load from JSON; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_options == 0 {
            return Err(ConfigError::ZeroMaxOptions);
        }
        if self.max_label_len == 0 {
            return Err(ConfigError::ZeroLabelLength);
        }
        Ok(())
    }
}
