//! The immutable bundle of reference catalogs used by a triage run

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use core_kernel::{DenialCode, PayerId, ProcedureCode, RemarkCode};
use crate::error::CatalogError;
use crate::payer::PayerRule;
use crate::procedure::ProcedureRiskProfile;
use crate::remark::RemarkEntry;
use crate::taxonomy::DenialTaxonomyEntry;

/// All four reference catalogs, keyed by their natural codes
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalogs {
    taxonomy: HashMap<DenialCode, DenialTaxonomyEntry>,
    remarks: HashMap<RemarkCode, RemarkEntry>,
    procedures: HashMap<ProcedureCode, ProcedureRiskProfile>,
    payers: HashMap<PayerId, PayerRule>,
}

/// Entry counts, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub taxonomy: usize,
    pub remarks: usize,
    pub procedures: usize,
    pub payers: usize,
}

impl ReferenceCatalogs {
    /// Builds keyed catalogs from entry lists and validates every entry
    ///
    /// Duplicate keys are rejected rather than last-one-wins so that a
    /// catalog with conflicting rows never silently changes valuations.
    pub fn from_parts(
        taxonomy: Vec<DenialTaxonomyEntry>,
        remarks: Vec<RemarkEntry>,
        procedures: Vec<ProcedureRiskProfile>,
        payers: Vec<PayerRule>,
    ) -> Result<Self, CatalogError> {
        let catalogs = Self {
            taxonomy: index("taxonomy", taxonomy, |e| e.code.clone())?,
            remarks: index("remark", remarks, |e| e.code.clone())?,
            procedures: index("procedure", procedures, |e| e.procedure_code.clone())?,
            payers: index("payer", payers, |e| e.payer_id.clone())?,
        };
        catalogs.validate()?;

        debug!(stats = ?catalogs.stats(), "Reference catalogs assembled");
        Ok(catalogs)
    }

    /// Validates numeric ranges across all catalogs
    pub fn validate(&self) -> Result<(), CatalogError> {
        for entry in self.taxonomy.values() {
            entry.validate()?;
        }
        for rule in self.payers.values() {
            rule.validate()?;
        }
        for profile in self.procedures.values() {
            if profile.denial_rate_pct.is_sign_negative() {
                return Err(CatalogError::InvalidProcedureProfile {
                    code: profile.procedure_code.to_string(),
                    reason: format!("negative denial rate {}", profile.denial_rate_pct),
                });
            }
        }
        Ok(())
    }

    pub fn taxonomy_entry(&self, code: &DenialCode) -> Option<&DenialTaxonomyEntry> {
        self.taxonomy.get(code)
    }

    pub fn remark(&self, code: &RemarkCode) -> Option<&RemarkEntry> {
        self.remarks.get(code)
    }

    pub fn procedure_profile(&self, code: &ProcedureCode) -> Option<&ProcedureRiskProfile> {
        self.procedures.get(code)
    }

    pub fn payer_rule(&self, payer_id: &PayerId) -> Option<&PayerRule> {
        self.payers.get(payer_id)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            taxonomy: self.taxonomy.len(),
            remarks: self.remarks.len(),
            procedures: self.procedures.len(),
            payers: self.payers.len(),
        }
    }
}

fn index<K, V, F>(catalog: &'static str, entries: Vec<V>, key_of: F) -> Result<HashMap<K, V>, CatalogError>
where
    K: Eq + Hash + ToString,
    F: Fn(&V) -> K,
{
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        let key = key_of(&entry);
        if map.contains_key(&key) {
            return Err(CatalogError::DuplicateKey {
                catalog,
                key: key.to_string(),
            });
        }
        map.insert(key, entry);
    }
    Ok(map)
}
