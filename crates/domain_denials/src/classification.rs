//! Action classification
//!
//! Each scored denial is classified by a small decision table evaluated top
//! to bottom, first match wins:
//!
//! | # | guard                                                       | action                |
//! |---|-------------------------------------------------------------|-----------------------|
//! | 1 | group is PR and the code is in the hard-excluded set        | `EXCLUDED`            |
//! | 2 | denial kind is SOFT                                         | `ACTIONABLE`          |
//! | 3 | denial kind is HARD and recovery rate > 25%                 | `CONDITIONAL`         |
//! | 4 | denial kind is HARD                                         | `WRITE-OFF CANDIDATE` |
//! | 5 | otherwise (including unmatched codes)                       | `REVIEW`              |

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::DenialCode;
use domain_catalog::{AdjustmentGroup, DenialKind, DenialTaxonomyEntry};
use crate::error::TriageError;
use crate::scoring::ScoredDenial;

/// Recovery rate (percent) above which a hard denial is still worth appealing
pub const CONDITIONAL_RECOVERY_THRESHOLD: Decimal = dec!(25);

/// Last-resort category for codes neither the taxonomy nor the fixed map knows
pub const DEFAULT_CATEGORY: &str = "Credentialing";

/// Remediation action for a denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionClass {
    /// Patient-share adjustment, not recoverable by this workflow
    #[serde(rename = "EXCLUDED")]
    Excluded,
    /// Correctable; resubmit or appeal
    #[serde(rename = "ACTIONABLE")]
    Actionable,
    /// Hard denial worth appealing only with supporting proof
    #[serde(rename = "CONDITIONAL")]
    Conditional,
    /// Hard denial with poor recovery history
    #[serde(rename = "WRITE-OFF CANDIDATE")]
    WriteOffCandidate,
    /// Needs a human decision
    #[serde(rename = "REVIEW")]
    Review,
}

impl ActionClass {
    pub const ALL: [ActionClass; 5] = [
        ActionClass::Excluded,
        ActionClass::Actionable,
        ActionClass::Conditional,
        ActionClass::WriteOffCandidate,
        ActionClass::Review,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionClass::Excluded => "EXCLUDED",
            ActionClass::Actionable => "ACTIONABLE",
            ActionClass::Conditional => "CONDITIONAL",
            ActionClass::WriteOffCandidate => "WRITE-OFF CANDIDATE",
            ActionClass::Review => "REVIEW",
        }
    }

    /// The actions routed to the work queue unless configured otherwise
    pub fn default_queue_actions() -> BTreeSet<ActionClass> {
        BTreeSet::from([
            ActionClass::Actionable,
            ActionClass::Conditional,
            ActionClass::Review,
        ])
    }
}

/// Actions order by their label so queue grouping is lexical
impl Ord for ActionClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl PartialOrd for ActionClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ActionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActionClass {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        ActionClass::ALL
            .into_iter()
            .find(|action| action.label() == wanted)
            .ok_or_else(|| TriageError::configuration(format!("unknown action label '{}'", s.trim())))
    }
}

/// Deadline pressure on a denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeSensitivity {
    Critical,
    Standard,
}

impl TimeSensitivity {
    pub fn from_urgency(is_urgent: bool) -> Self {
        if is_urgent {
            TimeSensitivity::Critical
        } else {
            TimeSensitivity::Standard
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSensitivity::Critical => "CRITICAL",
            TimeSensitivity::Standard => "STANDARD",
        }
    }

    pub fn is_critical(&self) -> bool {
        *self == TimeSensitivity::Critical
    }
}

impl fmt::Display for TimeSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-record classification outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub action: ActionClass,
    pub category: String,
    pub time_sensitivity: TimeSensitivity,
}

type Guard = fn(&ClassificationPolicy, &DenialTaxonomyEntry) -> bool;

const DECISION_TABLE: [(Guard, ActionClass); 4] = [
    (ClassificationPolicy::is_excluded_patient_share, ActionClass::Excluded),
    (ClassificationPolicy::is_soft, ActionClass::Actionable),
    (ClassificationPolicy::is_recoverable_hard, ActionClass::Conditional),
    (ClassificationPolicy::is_hard, ActionClass::WriteOffCandidate),
];

/// Parameters of the decision table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPolicy {
    hard_excluded_codes: BTreeSet<DenialCode>,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self::new(["PR-1", "PR-2", "PR-3"].map(DenialCode::new))
    }
}

impl ClassificationPolicy {
    pub fn new(hard_excluded_codes: impl IntoIterator<Item = DenialCode>) -> Self {
        Self {
            hard_excluded_codes: hard_excluded_codes.into_iter().collect(),
        }
    }

    pub fn hard_excluded_codes(&self) -> &BTreeSet<DenialCode> {
        &self.hard_excluded_codes
    }

    /// Classifies one scored denial
    pub fn classify(&self, scored: &ScoredDenial<'_>) -> Classification {
        let entry = scored.enriched.taxonomy.entry();
        Classification {
            action: self.action_for(entry),
            category: category_for(entry).to_string(),
            time_sensitivity: TimeSensitivity::from_urgency(scored.is_urgent),
        }
    }

    /// Runs the decision table against a taxonomy entry
    pub fn action_for(&self, entry: &DenialTaxonomyEntry) -> ActionClass {
        DECISION_TABLE
            .iter()
            .find(|(guard, _)| guard(self, entry))
            .map(|(_, action)| *action)
            .unwrap_or(ActionClass::Review)
    }

    fn is_excluded_patient_share(&self, entry: &DenialTaxonomyEntry) -> bool {
        entry.group == AdjustmentGroup::PatientResponsibility
            && self.hard_excluded_codes.contains(&entry.code)
    }

    fn is_soft(&self, entry: &DenialTaxonomyEntry) -> bool {
        entry.denial_kind == DenialKind::Soft
    }

    fn is_recoverable_hard(&self, entry: &DenialTaxonomyEntry) -> bool {
        entry.denial_kind == DenialKind::Hard
            && entry.avg_recovery_rate > CONDITIONAL_RECOVERY_THRESHOLD
    }

    fn is_hard(&self, entry: &DenialTaxonomyEntry) -> bool {
        entry.denial_kind == DenialKind::Hard
    }
}

/// Category label: the taxonomy's own, else the fixed fallback map
pub fn category_for(entry: &DenialTaxonomyEntry) -> &str {
    match entry.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => category,
        _ => fallback_category(&entry.code),
    }
}

/// Closed code -> category map; any other code resolves to [`DEFAULT_CATEGORY`]
pub fn fallback_category(code: &DenialCode) -> &'static str {
    match code.as_str() {
        "CO-16" | "CO-18" | "CO-22" | "CO-31" | "OA-18" => "Billing Error",
        "CO-B7" | "CO-170" | "CO-185" => "Provider Enrollment",
        "PR-1" | "PR-2" | "PR-3" => "Patient Responsibility",
        "CO-96" | "CO-204" | "OA-96" | "PI-96" => "Non-Covered",
        "CO-4" | "CO-11" | "CO-97" | "CO-167" => "Coding",
        _ => DEFAULT_CATEGORY,
    }
}
