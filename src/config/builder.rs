//! Builder for `MachineConfig`.

use crate::config::error::ConfigError;
use crate::config::{DeadlineMode, MachineConfig};

/// Fluent builder for machine configuration.
///
/// Every field starts at its default, so only the overrides need to be set.
pub struct MachineConfigBuilder {
    config: MachineConfig,
}

impl MachineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
        }
    }

    /// How the first `Create` argument is read.
    pub fn deadline(mut self, mode: DeadlineMode) -> Self {
        self.config.deadline = mode;
        self
    }

    /// Upper bound on the number of options an election may declare.
    pub fn max_options(mut self, n: u32) -> Self {
        self.config.max_options = n;
        self
    }

    /// Upper bound on the byte length of a single option label.
    pub fn max_label_len(mut self, n: usize) -> Self {
        self.config.max_label_len = n;
        self
    }

    /// Build the configuration, rejecting limits that would forbid every election.
    pub fn build(self) -> Result<MachineConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for MachineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
