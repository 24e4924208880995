//! Denial enrichment
//!
//! Joins a denied claim line to its taxonomy entry, procedure risk profile
//! and remark glossary entry. Catalog entries are borrowed, never copied or
//! mutated; only the fallback taxonomy entry for an unmatched code is owned.

use std::ops::Deref;

use rust_decimal::Decimal;

use domain_catalog::{
    DenialTaxonomyEntry, ProcedureRiskProfile, ReferenceCatalogs, RemarkEntry,
};
use crate::record::DenialRecord;

/// The taxonomy entry a denial was enriched with
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonomyMatch<'c> {
    /// The code was found in the taxonomy catalog
    Matched(&'c DenialTaxonomyEntry),
    /// The code was not found; see [`DenialTaxonomyEntry::fallback`]
    Fallback(DenialTaxonomyEntry),
}

impl<'c> TaxonomyMatch<'c> {
    pub fn entry(&self) -> &DenialTaxonomyEntry {
        match self {
            TaxonomyMatch::Matched(entry) => entry,
            TaxonomyMatch::Fallback(entry) => entry,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, TaxonomyMatch::Matched(_))
    }
}

impl<'c> Deref for TaxonomyMatch<'c> {
    type Target = DenialTaxonomyEntry;

    fn deref(&self) -> &DenialTaxonomyEntry {
        self.entry()
    }
}

/// A denial record joined with its reference data
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedDenial<'c> {
    pub record: DenialRecord,
    pub taxonomy: TaxonomyMatch<'c>,
    /// Advisory; absent when the procedure is not profiled
    pub profile: Option<&'c ProcedureRiskProfile>,
    /// Advisory; absent when there is no remark or it is not in the glossary
    pub remark: Option<&'c RemarkEntry>,
}

/// Enriches one denied record
///
/// The caller is expected to pass only lines whose status is `denied`.
/// `default_recovery_rate` (percent) and `default_rework_cost` populate the
/// fallback taxonomy entry when the record's code has no match.
pub fn enrich<'c>(
    record: DenialRecord,
    catalogs: &'c ReferenceCatalogs,
    default_recovery_rate: Decimal,
    default_rework_cost: Decimal,
) -> EnrichedDenial<'c> {
    let taxonomy = match catalogs.taxonomy_entry(&record.denial_code) {
        Some(entry) => TaxonomyMatch::Matched(entry),
        None => TaxonomyMatch::Fallback(DenialTaxonomyEntry::fallback(
            &record.denial_code,
            default_recovery_rate,
            default_rework_cost,
        )),
    };
    let profile = record
        .procedure()
        .and_then(|code| catalogs.procedure_profile(code));
    let remark = record.remark().and_then(|code| catalogs.remark(code));

    EnrichedDenial {
        record,
        taxonomy,
        profile,
        remark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{ClaimId, Currency, DenialCode, Money, PayerId, ProcedureCode, RemarkCode};
    use domain_catalog::{
        AdjustmentGroup, DenialKind, PriorityTier, RemarkClass, RiskLevel,
    };
    use rust_decimal_macros::dec;

    fn catalogs() -> ReferenceCatalogs {
        ReferenceCatalogs::from_parts(
            vec![DenialTaxonomyEntry {
                code: DenialCode::new("CO-16"),
                group: AdjustmentGroup::Contractual,
                denial_kind: DenialKind::Soft,
                category: Some("Billing Error".to_string()),
                description: None,
                recommended_action: "Add missing information and resubmit".to_string(),
                routing_department: "Billing".to_string(),
                avg_recovery_rate: dec!(78.5),
                avg_rework_cost: dec!(25),
                priority_tier: PriorityTier::Tier1,
            }],
            vec![RemarkEntry {
                code: RemarkCode::new("N362"),
                classification: RemarkClass::Supplemental,
                description: None,
                required_action: "Correct units of service".to_string(),
                paired_codes: Default::default(),
            }],
            vec![ProcedureRiskProfile {
                procedure_code: ProcedureCode::new("99214"),
                specialty: "Primary Care".to_string(),
                denial_risk: RiskLevel::Medium,
                common_denial_codes: vec![DenialCode::new("CO-16")],
                denial_rate_pct: dec!(8),
                root_cause: "Documentation gaps".to_string(),
                prevention: "Template review".to_string(),
                recovery_potential: RiskLevel::High,
            }],
            vec![],
        )
        .unwrap()
    }

    fn record(code: &str, procedure: Option<&str>, remark: Option<&str>) -> DenialRecord {
        DenialRecord {
            claim_id: ClaimId::new("CLM-1"),
            payer_id: PayerId::new("AETNA"),
            procedure_code: procedure.map(ProcedureCode::new),
            denial_code: DenialCode::new(code),
            remark_code: remark.map(RemarkCode::new),
            balance: Money::new(dec!(100), Currency::USD),
            denial_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: "denied".to_string(),
        }
    }

    #[test]
    fn test_matched_code_borrows_catalog_entry() {
        let catalogs = catalogs();
        let enriched = enrich(record("CO-16", Some("99214"), Some("N362")), &catalogs, dec!(50), dec!(30));

        assert!(enriched.taxonomy.is_matched());
        assert_eq!(enriched.taxonomy.denial_kind, DenialKind::Soft);
        assert_eq!(enriched.profile.unwrap().specialty, "Primary Care");
        assert_eq!(enriched.remark.unwrap().required_action, "Correct units of service");
    }

    #[test]
    fn test_unmatched_code_gets_documented_fallback() {
        let catalogs = catalogs();
        let enriched = enrich(record("CO-999", None, None), &catalogs, dec!(50), dec!(30));

        assert!(!enriched.taxonomy.is_matched());
        assert_eq!(enriched.taxonomy.denial_kind, DenialKind::Review);
        assert_eq!(enriched.taxonomy.priority_tier, PriorityTier::LOWEST);
        assert_eq!(enriched.taxonomy.avg_recovery_rate, dec!(50));
        assert_eq!(enriched.taxonomy.avg_rework_cost, dec!(30));
        assert_eq!(enriched.taxonomy.routing_department, "Technical/Administrative");
    }

    #[test]
    fn test_missing_profile_and_blank_codes_are_tolerated() {
        let catalogs = catalogs();
        let enriched = enrich(record("CO-16", Some("  "), Some("")), &catalogs, dec!(50), dec!(30));
        assert!(enriched.profile.is_none());
        assert!(enriched.remark.is_none());

        let enriched = enrich(record("CO-16", Some("00000"), Some("M1")), &catalogs, dec!(50), dec!(30));
        assert!(enriched.profile.is_none());
        assert!(enriched.remark.is_none());
    }
}
