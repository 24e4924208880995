//! Procedure-level denial intelligence

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{DenialCode, ProcedureCode};

/// Three-level scale used for denial risk and recovery potential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        })
    }
}

/// Denial risk profile of a CPT/HCPCS procedure code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureRiskProfile {
    pub procedure_code: ProcedureCode,
    pub specialty: String,
    pub denial_risk: RiskLevel,
    /// Most frequent adjustment codes for this procedure, most common first
    #[serde(default)]
    pub common_denial_codes: Vec<DenialCode>,
    /// Estimated denial rate in percent
    pub denial_rate_pct: Decimal,
    pub root_cause: String,
    pub prevention: String,
    pub recovery_potential: RiskLevel,
}

impl ProcedureRiskProfile {
    pub fn is_high_risk(&self) -> bool {
        self.denial_risk == RiskLevel::High
    }
}
