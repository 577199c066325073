//! Accumulating checks over `CreateParams`.

use crate::config::MachineConfig;
use crate::machine::CreateParams;
use crate::rules::violations::ParamViolation;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for deployment-specific parameter checks
pub type ParamCheck =
    Box<dyn Fn(&CreateParams) -> Validation<(), NonEmptyVec<ParamViolation>> + Send + Sync>;

/// Rules every `Create` must satisfy.
pub struct ParamRules {
    max_options: u32,
    max_label_len: usize,
    custom_checks: Vec<ParamCheck>,
}

impl ParamRules {
    pub fn from_config(config: &MachineConfig) -> Self {
        Self {
            max_options: config.max_options,
            max_label_len: config.max_label_len,
            custom_checks: Vec::new(),
        }
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&CreateParams) -> Validation<(), NonEmptyVec<ParamViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.custom_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&CreateParams) -> bool + Send + Sync + 'static,
    {
        let check = move |params: &CreateParams| {
            if predicate(params) {
                Validation::success(())
            } else {
                Validation::fail(ParamViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.custom_checks.push(Box::new(check));
        self
    }

    /// Enforce all rules, accumulating every violation.
    pub fn enforce(&self, params: &CreateParams) -> Validation<(), NonEmptyVec<ParamViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ParamViolation>>> = Vec::new();

        let count = if params.num_options == 0 {
            Validation::fail(ParamViolation::NoOptions)
        } else if params.num_options > u64::from(self.max_options) {
            Validation::fail(ParamViolation::TooManyOptions {
                max: self.max_options,
                found: params.num_options,
            })
        } else {
            Validation::success(())
        };
        checks.push(count);

        if params.option_labels.len() as u64 != params.num_options {
            checks.push(Validation::fail(ParamViolation::LabelCountMismatch {
                expected: params.num_options,
                found: params.option_labels.len(),
            }));
        }

        let mut seen = HashSet::new();
        for (index, label) in params.option_labels.iter().enumerate() {
            if label.is_empty() {
                checks.push(Validation::fail(ParamViolation::EmptyLabel { index }));
            } else if label.len() > self.max_label_len {
                checks.push(Validation::fail(ParamViolation::LabelTooLong {
                    index,
                    len: label.len(),
                    max: self.max_label_len,
                }));
            } else if !seen.insert(label.as_str()) {
                checks.push(Validation::fail(ParamViolation::DuplicateLabel {
                    label: label.clone(),
                }));
            }
        }

        for check_fn in &self.custom_checks {
            checks.push(check_fn(params));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfigBuilder;

    fn params(num_options: u64, labels: &[&str]) -> CreateParams {
        CreateParams {
            end: 100,
            num_options,
            option_labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn violations(result: Validation<(), NonEmptyVec<ParamViolation>>) -> Vec<ParamViolation> {
        match result {
            Validation::Failure(errors) => errors.iter().cloned().collect(),
            Validation::Success(_) => Vec::new(),
        }
    }

    #[test]
    fn valid_params_pass() {
        let rules = ParamRules::from_config(&MachineConfig::default());
        assert!(rules.enforce(&params(2, &["A", "B"])).is_success());
    }

    #[test]
    fn zero_options_rejected() {
        let rules = ParamRules::from_config(&MachineConfig::default());
        assert_eq!(
            violations(rules.enforce(&params(0, &[]))),
            vec![ParamViolation::NoOptions]
        );
    }

    #[test]
    fn accumulates_all_violations() {
        let rules = ParamRules::from_config(&MachineConfig::default());
        let found = violations(rules.enforce(&params(4, &["A", "", "A"])));

        assert_eq!(found.len(), 3);
        assert!(found.contains(&ParamViolation::LabelCountMismatch {
            expected: 4,
            found: 3
        }));
        assert!(found.contains(&ParamViolation::EmptyLabel { index: 1 }));
        assert!(found.contains(&ParamViolation::DuplicateLabel {
            label: "A".to_string()
        }));
    }

    #[test]
    fn limits_come_from_config() {
        let config = MachineConfigBuilder::new()
            .max_options(2)
            .max_label_len(3)
            .build()
            .unwrap();
        let rules = ParamRules::from_config(&config);
        let found = violations(rules.enforce(&params(3, &["A", "B", "long"])));

        assert!(found.contains(&ParamViolation::TooManyOptions { max: 2, found: 3 }));
        assert!(found.contains(&ParamViolation::LabelTooLong {
            index: 2,
            len: 4,
            max: 3
        }));
    }

    #[test]
    fn custom_predicate_is_enforced() {
        let rules = ParamRules::from_config(&MachineConfig::default()).require_pred(
            |p| p.end >= 10,
            "election must run past round 10".to_string(),
        );

        let mut short = params(1, &["A"]);
        short.end = 5;

        assert_eq!(
            violations(rules.enforce(&short)),
            vec![ParamViolation::CustomCheckFailed {
                message: "election must run past round 10".to_string()
            }]
        );
    }

    #[test]
    fn custom_validation_check_works() {
        let rules = ParamRules::from_config(&MachineConfig::default()).require(|p| {
            if p.option_labels.iter().all(|l| l.is_ascii()) {
                Validation::success(())
            } else {
                Validation::fail(ParamViolation::CustomCheckFailed {
                    message: "labels must be ascii".to_string(),
                })
            }
        });

        assert!(rules.enforce(&params(1, &["é"])).is_failure());
        assert!(rules.enforce(&params(1, &["e"])).is_success());
    }
}
