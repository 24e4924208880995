//! Remittance advice remark codes

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{DenialCode, RemarkCode};

/// Remark code classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemarkClass {
    /// Informational alert; no action implied by the remark itself
    Alert,
    /// Supplemental explanation of an adjustment reason
    Supplemental,
}

/// Glossary entry for a remark code
///
/// `paired_codes` records which adjustment codes the remark usually travels
/// with. It is informational and never used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkEntry {
    pub code: RemarkCode,
    pub classification: RemarkClass,
    #[serde(default)]
    pub description: Option<String>,
    pub required_action: String,
    #[serde(default)]
    pub paired_codes: BTreeSet<DenialCode>,
}

impl RemarkEntry {
    pub fn is_alert(&self) -> bool {
        self.classification == RemarkClass::Alert
    }

    /// True when the remark is commonly seen with the given adjustment code
    pub fn pairs_with(&self, code: &DenialCode) -> bool {
        self.paired_codes.contains(code)
    }
}
