//! Per-run triage parameters

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, DenialCode};
use crate::classification::{ActionClass, ClassificationPolicy};
use crate::error::TriageError;
use crate::scoring::CRITICAL_DEADLINE_DAYS;

/// Tunables for one triage run
///
/// Every field has a default, so a partial file or environment overlay
/// deserializes into a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Currency every balance in the run must be in
    pub currency: Currency,
    /// Days remaining below which a denial is CRITICAL
    pub critical_deadline_days: u32,
    /// Recovery rate (percent) for codes missing from the taxonomy
    pub default_recovery_rate: Decimal,
    /// Rework cost for codes missing from the taxonomy
    pub default_rework_cost: Decimal,
    /// Financial rank cut-off of the work queue
    pub top_n_financial: usize,
    /// Action labels admitted to the work queue
    pub include_actions: Vec<String>,
    /// Patient-responsibility codes never worked
    pub hard_excluded_codes: Vec<DenialCode>,
    /// Reject denials whose deadline passed more than this many days ago
    pub max_days_past_deadline: Option<u32>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            critical_deadline_days: CRITICAL_DEADLINE_DAYS,
            default_recovery_rate: dec!(50.0),
            default_rework_cost: dec!(30.00),
            top_n_financial: 100,
            include_actions: ActionClass::default_queue_actions()
                .iter()
                .map(|action| action.label().to_string())
                .collect(),
            hard_excluded_codes: ClassificationPolicy::default()
                .hard_excluded_codes()
                .iter()
                .cloned()
                .collect(),
            max_days_past_deadline: None,
        }
    }
}

impl TriageConfig {
    pub fn validate(&self) -> Result<(), TriageError> {
        if self.default_recovery_rate < Decimal::ZERO || self.default_recovery_rate > dec!(100) {
            return Err(TriageError::configuration(format!(
                "default_recovery_rate {} outside [0,100]",
                self.default_recovery_rate
            )));
        }
        if self.default_rework_cost < Decimal::ZERO {
            return Err(TriageError::configuration(format!(
                "default_rework_cost {} is negative",
                self.default_rework_cost
            )));
        }
        self.include_action_set()?;
        Ok(())
    }

    /// Parsed queue actions; an unknown label is a configuration error
    pub fn include_action_set(&self) -> Result<BTreeSet<ActionClass>, TriageError> {
        self.include_actions
            .iter()
            .map(|label| label.parse::<ActionClass>())
            .collect()
    }

    pub fn policy(&self) -> ClassificationPolicy {
        ClassificationPolicy::new(self.hard_excluded_codes.iter().cloned())
    }
}
