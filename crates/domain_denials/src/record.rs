//! Denied claim lines as handed over by ingestion

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DenialCode, Money, PayerId, ProcedureCode, RemarkCode};

/// Status value of lines the engine processes
pub const DENIED_STATUS: &str = "denied";

/// One denied claim line
///
/// Produced upstream and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialRecord {
    pub claim_id: ClaimId,
    pub payer_id: PayerId,
    #[serde(default)]
    pub procedure_code: Option<ProcedureCode>,
    /// Group-qualified adjustment reason code (`CO-16`)
    pub denial_code: DenialCode,
    #[serde(default)]
    pub remark_code: Option<RemarkCode>,
    /// Outstanding balance on the line
    pub balance: Money,
    pub denial_date: NaiveDate,
    pub status: String,
}

impl DenialRecord {
    /// True when the line's status is `denied` (case-insensitive)
    pub fn is_denied(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(DENIED_STATUS)
    }

    /// Procedure code, ignoring blanks
    pub fn procedure(&self) -> Option<&ProcedureCode> {
        self.procedure_code.as_ref().filter(|code| !code.is_blank())
    }

    /// Remark code, ignoring blanks
    pub fn remark(&self) -> Option<&RemarkCode> {
        self.remark_code.as_ref().filter(|code| !code.is_blank())
    }
}
