//! Adjustment reason taxonomy
//!
//! One entry per group-qualified adjustment reason code (`CO-16`, `PR-1`, ...).
//! The entry carries everything the engine needs to value and route a denial:
//! whether it is correctable (soft) or typically final (hard), the historical
//! recovery rate, the cost of reworking the claim, and a priority tier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::DenialCode;
use crate::error::CatalogError;

/// Routing department for codes with no taxonomy entry
pub const DEFAULT_ROUTING_DEPARTMENT: &str = "Technical/Administrative";

/// Recommended action text for codes with no taxonomy entry
pub const DEFAULT_RECOMMENDED_ACTION: &str =
    "Unmapped adjustment code: review the remittance and assign handling manually";

/// Adjustment group code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentGroup {
    /// CO - contractual obligation, provider write-off unless overturned
    #[serde(rename = "CO")]
    Contractual,
    /// PR - patient responsibility (deductible, coinsurance, copay)
    #[serde(rename = "PR")]
    PatientResponsibility,
    /// OA - other adjustment
    #[serde(rename = "OA")]
    Other,
    /// PI - payer initiated reduction
    #[serde(rename = "PI")]
    PayerInitiated,
}

impl AdjustmentGroup {
    /// Parses the two-letter group prefix of an adjustment code
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.trim().to_ascii_uppercase().as_str() {
            "CO" => Some(Self::Contractual),
            "PR" => Some(Self::PatientResponsibility),
            "OA" => Some(Self::Other),
            "PI" => Some(Self::PayerInitiated),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Contractual => "CO",
            Self::PatientResponsibility => "PR",
            Self::Other => "OA",
            Self::PayerInitiated => "PI",
        }
    }
}

impl fmt::Display for AdjustmentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether a denial is correctable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DenialKind {
    /// Correctable through resubmission or appeal with documentation
    Soft,
    /// Typically non-recoverable without exceptional circumstances
    Hard,
    /// Neither; assigned to codes the taxonomy does not know
    Review,
}

impl DenialKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Soft => "SOFT",
            Self::Hard => "HARD",
            Self::Review => "REVIEW",
        }
    }
}

impl fmt::Display for DenialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Return-on-effort tier, 1 being the highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriorityTier {
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
}

impl PriorityTier {
    pub const HIGHEST: PriorityTier = PriorityTier::Tier1;
    pub const LOWEST: PriorityTier = PriorityTier::Tier3;

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for PriorityTier {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Tier1),
            2 => Ok(Self::Tier2),
            3 => Ok(Self::Tier3),
            other => Err(CatalogError::InvalidPriorityTier(other)),
        }
    }
}

impl From<PriorityTier> for u8 {
    fn from(tier: PriorityTier) -> u8 {
        tier.as_u8()
    }
}

/// A taxonomy entry for one adjustment reason code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialTaxonomyEntry {
    /// Group-qualified code, e.g. `CO-16`
    pub code: DenialCode,
    pub group: AdjustmentGroup,
    pub denial_kind: DenialKind,
    /// Category label; unmapped categories fall back to the classifier's fixed map
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub recommended_action: String,
    pub routing_department: String,
    /// Historical recovery rate in percent (0-100)
    pub avg_recovery_rate: Decimal,
    /// Average cost of reworking one claim line
    pub avg_rework_cost: Decimal,
    pub priority_tier: PriorityTier,
}

impl DenialTaxonomyEntry {
    /// The entry used when a denial's code has no taxonomy match
    ///
    /// Kind is `REVIEW`, tier is the lowest, routing goes to
    /// [`DEFAULT_ROUTING_DEPARTMENT`], and recovery rate and rework cost come
    /// from the run configuration. The group is taken from the code's prefix
    /// so patient-responsibility exclusions still apply; codes without a
    /// recognizable prefix are treated as `OA`.
    pub fn fallback(code: &DenialCode, recovery_rate: Decimal, rework_cost: Decimal) -> Self {
        let group = code
            .group_prefix()
            .and_then(AdjustmentGroup::from_prefix)
            .unwrap_or(AdjustmentGroup::Other);

        Self {
            code: code.clone(),
            group,
            denial_kind: DenialKind::Review,
            category: None,
            description: None,
            recommended_action: DEFAULT_RECOMMENDED_ACTION.to_string(),
            routing_department: DEFAULT_ROUTING_DEPARTMENT.to_string(),
            avg_recovery_rate: recovery_rate,
            avg_rework_cost: rework_cost,
            priority_tier: PriorityTier::LOWEST,
        }
    }

    /// Checks the numeric ranges of the entry
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.avg_recovery_rate < Decimal::ZERO || self.avg_recovery_rate > dec!(100) {
            return Err(CatalogError::InvalidTaxonomyEntry {
                code: self.code.to_string(),
                reason: format!("recovery rate {} outside [0,100]", self.avg_recovery_rate),
            });
        }
        if self.avg_rework_cost < Decimal::ZERO {
            return Err(CatalogError::InvalidTaxonomyEntry {
                code: self.code.to_string(),
                reason: format!("negative rework cost {}", self.avg_rework_cost),
            });
        }
        Ok(())
    }
}
