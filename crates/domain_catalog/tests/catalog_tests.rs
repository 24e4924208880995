//! Tests for reference catalog assembly, validation and lookups

use std::collections::BTreeSet;

use core_kernel::{DenialCode, PayerId, ProcedureCode, Rate, RemarkCode};
use domain_catalog::{
    AdjustmentGroup, CatalogError, DenialKind, DenialTaxonomyEntry, PayerRule, PriorityTier,
    ProcedureRiskProfile, ReferenceCatalogs, RemarkClass, RemarkEntry, RiskLevel,
};
use rust_decimal_macros::dec;

fn taxonomy_entry(code: &str, kind: DenialKind) -> DenialTaxonomyEntry {
    DenialTaxonomyEntry {
        code: DenialCode::new(code),
        group: AdjustmentGroup::Contractual,
        denial_kind: kind,
        category: Some("Billing Error".to_string()),
        description: None,
        recommended_action: "Correct and resubmit".to_string(),
        routing_department: "Billing".to_string(),
        avg_recovery_rate: dec!(78.5),
        avg_rework_cost: dec!(25),
        priority_tier: PriorityTier::Tier1,
    }
}

fn profile(code: &str) -> ProcedureRiskProfile {
    ProcedureRiskProfile {
        procedure_code: ProcedureCode::new(code),
        specialty: "Radiology".to_string(),
        denial_risk: RiskLevel::High,
        common_denial_codes: vec![DenialCode::new("CO-197")],
        denial_rate_pct: dec!(18.5),
        root_cause: "Missing prior authorization".to_string(),
        prevention: "Verify authorization at scheduling".to_string(),
        recovery_potential: RiskLevel::Medium,
    }
}

fn remark(code: &str) -> RemarkEntry {
    RemarkEntry {
        code: RemarkCode::new(code),
        classification: RemarkClass::Alert,
        description: None,
        required_action: "Attach documentation".to_string(),
        paired_codes: BTreeSet::from([DenialCode::new("CO-16")]),
    }
}

mod assembly_tests {
    use super::*;

    #[test]
    fn test_from_parts_indexes_all_catalogs() {
        let catalogs = ReferenceCatalogs::from_parts(
            vec![taxonomy_entry("CO-16", DenialKind::Soft)],
            vec![remark("N362")],
            vec![profile("70553")],
            vec![PayerRule::new("AETNA", 180, Rate::new(dec!(0.55)))],
        )
        .unwrap();

        let stats = catalogs.stats();
        assert_eq!(stats.taxonomy, 1);
        assert_eq!(stats.remarks, 1);
        assert_eq!(stats.procedures, 1);
        assert_eq!(stats.payers, 1);

        assert!(catalogs.taxonomy_entry(&DenialCode::new("co-16")).is_some());
        assert!(catalogs.remark(&RemarkCode::new("N362")).unwrap().is_alert());
        assert!(catalogs.procedure_profile(&ProcedureCode::new("70553")).unwrap().is_high_risk());
        assert_eq!(
            catalogs.payer_rule(&PayerId::new("aetna")).unwrap().appeal_deadline_days,
            180
        );
    }

    #[test]
    fn test_duplicate_taxonomy_code_is_rejected() {
        let result = ReferenceCatalogs::from_parts(
            vec![
                taxonomy_entry("CO-16", DenialKind::Soft),
                taxonomy_entry("co-16", DenialKind::Hard),
            ],
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateKey {
                catalog: "taxonomy",
                key: "CO-16".to_string()
            }
        );
    }

    #[test]
    fn test_missing_lookups_return_none() {
        let catalogs = ReferenceCatalogs::default();
        assert!(catalogs.taxonomy_entry(&DenialCode::new("CO-16")).is_none());
        assert!(catalogs.payer_rule(&PayerId::new("UNKNOWN")).is_none());
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_yield_rate_above_one_is_configuration_error() {
        let result = ReferenceCatalogs::from_parts(
            vec![],
            vec![],
            vec![],
            vec![PayerRule::new("CIGNA", 90, Rate::new(dec!(1.5)))],
        );
        assert!(matches!(result, Err(CatalogError::InvalidPayerRule { .. })));
    }

    #[test]
    fn test_negative_deadline_is_configuration_error() {
        let result = ReferenceCatalogs::from_parts(
            vec![],
            vec![],
            vec![],
            vec![PayerRule::new("CIGNA", -1, Rate::new(dec!(0.5)))],
        );
        assert!(matches!(result, Err(CatalogError::InvalidPayerRule { .. })));
    }

    #[test]
    fn test_negative_rework_cost_is_rejected() {
        let mut entry = taxonomy_entry("CO-16", DenialKind::Soft);
        entry.avg_rework_cost = dec!(-1);
        let result = ReferenceCatalogs::from_parts(vec![entry], vec![], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::InvalidTaxonomyEntry { .. })));
    }

    #[test]
    fn test_negative_procedure_denial_rate_is_rejected() {
        let mut bad = profile("99214");
        bad.denial_rate_pct = dec!(-3);
        let result = ReferenceCatalogs::from_parts(vec![], vec![], vec![bad], vec![]);
        assert!(matches!(result, Err(CatalogError::InvalidProcedureProfile { .. })));
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_taxonomy_entry_from_json() {
        let json = r#"{
            "code": "co-50",
            "group": "CO",
            "denial_kind": "HARD",
            "category": "Non-Covered",
            "recommended_action": "Appeal with medical necessity letter",
            "routing_department": "Clinical Appeals",
            "avg_recovery_rate": "30",
            "avg_rework_cost": "45.00",
            "priority_tier": 2
        }"#;

        let entry: DenialTaxonomyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.code.as_str(), "CO-50");
        assert_eq!(entry.denial_kind, DenialKind::Hard);
        assert_eq!(entry.priority_tier, PriorityTier::Tier2);
        assert_eq!(entry.avg_recovery_rate, dec!(30));
    }

    #[test]
    fn test_priority_tier_out_of_range_fails_to_parse() {
        let json = r#"{
            "code": "CO-50", "group": "CO", "denial_kind": "HARD",
            "recommended_action": "", "routing_department": "",
            "avg_recovery_rate": "30", "avg_rework_cost": "45",
            "priority_tier": 7
        }"#;
        assert!(serde_json::from_str::<DenialTaxonomyEntry>(json).is_err());
    }

    #[test]
    fn test_payer_rule_from_json() {
        let rule: PayerRule =
            serde_json::from_str(r#"{"payer_id":"bcbs","appeal_deadline_days":120,"yield_rate":0.5}"#)
                .unwrap();
        assert_eq!(rule.payer_id.as_str(), "BCBS");
        assert_eq!(rule.yield_rate.as_decimal(), dec!(0.5));
    }
}
