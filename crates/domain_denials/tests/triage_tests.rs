//! End-to-end tests for the denial triage pipeline

use std::collections::BTreeSet;

use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Currency, Money};
use domain_catalog::{DenialKind, PriorityTier, ReferenceCatalogs};
use domain_denials::{
    ActionClass, DenialRecord, RejectReason, TimeSensitivity, TriageConfig, TriageEngine,
    TriageOutcome, TriageRow,
};
use test_utils::{
    assert_money_eq, assert_queue_admission, assert_queue_ordered, assert_total_ranking,
    record_batch_strategy, CatalogFixtures, DenialRecordBuilder, PayerRuleBuilder,
    TaxonomyEntryBuilder, TriageFixtures,
};

fn run(records: Vec<DenialRecord>) -> TriageOutcome<'static> {
    run_with(TriageConfig::default(), records)
}

fn run_with(config: TriageConfig, records: Vec<DenialRecord>) -> TriageOutcome<'static> {
    TriageEngine::new(config, CatalogFixtures::standard())
        .unwrap()
        .run(records, TriageFixtures::as_of())
        .unwrap()
}

fn claim_ids(rows: &[domain_denials::ClassifiedDenial<'_>]) -> Vec<String> {
    rows.iter()
        .map(|d| d.scored.enriched.record.claim_id.to_string())
        .collect()
}

// ============================================================================
// Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_soft_denial_net_recovery() {
        let outcome = run(vec![DenialRecordBuilder::new().build()]);

        let denial = &outcome.classified[0];
        assert_money_eq(&denial.scored.expected_recovery, dec!(600.00));
        assert_money_eq(&denial.scored.net_recovery, dec!(446.00));
        assert_eq!(denial.classification.action, ActionClass::Actionable);
        assert_eq!(denial.classification.category, "Billing Error");
        assert_eq!(denial.classification.time_sensitivity, TimeSensitivity::Standard);
        assert_eq!(outcome.queue.len(), 1);
    }

    #[test]
    fn test_hard_denial_with_poor_history_is_write_off_candidate() {
        let outcome = run(vec![DenialRecordBuilder::new().with_denial_code("CO-29").build()]);

        assert_eq!(outcome.classified[0].classification.action, ActionClass::WriteOffCandidate);
        // Not in the default queued actions
        assert!(outcome.queue.is_empty());
    }

    #[test]
    fn test_hard_denial_above_threshold_is_conditional() {
        let outcome = run(vec![DenialRecordBuilder::new().with_denial_code("CO-50").build()]);

        assert_eq!(outcome.classified[0].classification.action, ActionClass::Conditional);
        assert_eq!(outcome.classified[0].classification.category, "Medical Necessity");
        assert_eq!(outcome.queue.len(), 1);
    }

    #[test]
    fn test_urgent_denial_is_queued_regardless_of_rank() {
        let mut records: Vec<DenialRecord> = (1..=3)
            .map(|n| {
                DenialRecordBuilder::new()
                    .with_claim_id(format!("CLM-{n}"))
                    .with_balance(dec!(10000))
                    .build()
            })
            .collect();
        records.push(
            DenialRecordBuilder::new()
                .with_claim_id("CLM-9")
                .with_balance(dec!(100))
                .due_in(120, 5)
                .build(),
        );
        let config = TriageConfig {
            top_n_financial: 1,
            ..Default::default()
        };

        let outcome = run_with(config, records);

        let urgent = outcome
            .classified
            .iter()
            .find(|d| d.scored.enriched.record.claim_id == ClaimId::new("CLM-9"))
            .unwrap();
        assert_eq!(urgent.scored.days_remaining, 5);
        assert!(urgent.scored.is_urgent);
        assert_eq!(urgent.classification.time_sensitivity, TimeSensitivity::Critical);
        assert_eq!(urgent.financial_rank, 4);

        assert_eq!(claim_ids(&outcome.queue), vec!["CLM-9", "CLM-1"]);
    }

    #[test]
    fn test_patient_deductible_is_excluded_from_queue() {
        let outcome = run(vec![
            DenialRecordBuilder::new()
                .with_claim_id("CLM-1")
                .with_denial_code("PR-1")
                .build(),
            DenialRecordBuilder::new().with_claim_id("CLM-2").build(),
        ]);

        let excluded = outcome
            .classified
            .iter()
            .find(|d| d.classification.action == ActionClass::Excluded)
            .unwrap();
        assert_eq!(excluded.scored.enriched.record.claim_id, ClaimId::new("CLM-1"));
        assert_eq!(excluded.classification.category, "Patient Responsibility");
        assert_eq!(claim_ids(&outcome.queue), vec!["CLM-2"]);
    }

    #[test]
    fn test_empty_exclusion_set_classifies_by_kind() {
        let config = TriageConfig {
            include_actions: vec!["EXCLUDED".to_string()],
            hard_excluded_codes: vec![],
            ..Default::default()
        };
        let outcome = run_with(config, vec![DenialRecordBuilder::new().with_denial_code("PR-2").build()]);

        // With an empty exclusion set the deductible falls through to its denial kind
        assert_eq!(outcome.classified[0].classification.action, ActionClass::WriteOffCandidate);
        assert!(outcome.queue.is_empty());
    }
}

// ============================================================================
// Enrichment and Classification Tests
// ============================================================================

mod classification_tests {
    use super::*;

    #[test]
    fn test_unmatched_code_is_tier_three_review() {
        let outcome = run(vec![DenialRecordBuilder::new().with_denial_code("CO-999").build()]);
        let denial = &outcome.classified[0];
        let taxonomy = &denial.scored.enriched.taxonomy;

        assert!(!taxonomy.is_matched());
        assert_eq!(taxonomy.priority_tier, PriorityTier::Tier3);
        assert_eq!(taxonomy.denial_kind, DenialKind::Review);
        assert_eq!(denial.classification.action, ActionClass::Review);
        assert_eq!(denial.classification.category, "Credentialing");
        // 1000 * 0.6 * 50% - 30
        assert_money_eq(&denial.scored.net_recovery, dec!(270.00));
    }

    #[test]
    fn test_review_kind_is_review_action() {
        let outcome = run(vec![DenialRecordBuilder::new().with_denial_code("OA-23").build()]);
        assert_eq!(outcome.classified[0].classification.action, ActionClass::Review);
    }

    #[test]
    fn test_negative_net_value_is_kept_and_queued() {
        let outcome = run(vec![DenialRecordBuilder::new()
            .with_denial_code("CO-50")
            .with_balance(dec!(50))
            .build()]);

        let denial = &outcome.classified[0];
        // 50 * 0.6 * 30% - 45
        assert_money_eq(&denial.scored.net_recovery, dec!(-36.00));
        assert_eq!(outcome.queue.len(), 1);
    }

    #[test]
    fn test_passed_deadline_is_critical_not_dropped() {
        let outcome = run(vec![DenialRecordBuilder::new().due_in(120, -20).build()]);

        let denial = &outcome.classified[0];
        assert_eq!(denial.scored.days_remaining, -20);
        assert_eq!(denial.classification.time_sensitivity, TimeSensitivity::Critical);
        assert!(outcome.rejects.is_empty());
    }

    #[test]
    fn test_enrichment_attaches_profile_and_remark() {
        let outcome = run(vec![DenialRecordBuilder::new()
            .with_procedure("97110")
            .with_remark("M127")
            .build()]);

        let enriched = &outcome.classified[0].scored.enriched;
        assert!(enriched.profile.unwrap().is_high_risk());
        assert_eq!(enriched.remark.unwrap().required_action, "Attach medical records");
    }

    #[test]
    fn test_custom_catalogs() {
        let catalogs = ReferenceCatalogs::from_parts(
            vec![TaxonomyEntryBuilder::new("CO-4")
                .with_kind(DenialKind::Hard)
                .with_recovery_rate(dec!(25))
                .build()],
            vec![],
            vec![],
            vec![PayerRuleBuilder::new("UHC").with_yield(dec!(1)).build()],
        )
        .unwrap();
        let engine = TriageEngine::new(TriageConfig::default(), &catalogs).unwrap();

        let outcome = engine
            .run(
                vec![DenialRecordBuilder::new().with_payer("UHC").with_denial_code("CO-4").build()],
                TriageFixtures::as_of(),
            )
            .unwrap();

        // Exactly at the threshold is not above it
        assert_eq!(outcome.classified[0].classification.action, ActionClass::WriteOffCandidate);
        assert_eq!(outcome.classified[0].classification.category, "Coding");
    }
}

// ============================================================================
// Ranking and Queue Tests
// ============================================================================

mod ranking_tests {
    use super::*;

    #[test]
    fn test_ties_break_by_claim_id() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-B").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-A").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-C").with_balance(dec!(2000)).build(),
        ]);

        assert_eq!(claim_ids(&outcome.classified), vec!["CLM-C", "CLM-A", "CLM-B"]);
        assert_total_ranking(&outcome.classified);
    }

    #[test]
    fn test_per_payer_rank_and_percentile() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-1").with_balance(dec!(300)).build(),
            DenialRecordBuilder::new().with_claim_id("CLM-2").with_balance(dec!(200)).build(),
            DenialRecordBuilder::new().with_claim_id("CLM-3").with_balance(dec!(100)).build(),
            DenialRecordBuilder::new()
                .with_claim_id("CLM-4")
                .with_payer("AETNA")
                .with_balance(dec!(250))
                .build(),
        ]);

        let ranks: Vec<(String, usize, usize)> = outcome
            .classified
            .iter()
            .map(|d| {
                (
                    d.scored.enriched.record.claim_id.to_string(),
                    d.payer_rank.rank_in_payer,
                    d.payer_rank.payer_count,
                )
            })
            .collect();
        assert_eq!(
            ranks,
            vec![
                ("CLM-1".to_string(), 1, 3),
                ("CLM-4".to_string(), 1, 1),
                ("CLM-2".to_string(), 2, 3),
                ("CLM-3".to_string(), 3, 3),
            ]
        );
        assert_eq!(outcome.classified[1].payer_rank.payer_percentile, dec!(0));
        assert_eq!(outcome.classified[2].payer_rank.payer_percentile, dec!(0.5));
    }

    #[test]
    fn test_queue_orders_actions_then_net_value() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-1").with_denial_code("CO-50").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-2").with_denial_code("CO-999").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-3").with_balance(dec!(500)).build(),
            DenialRecordBuilder::new().with_claim_id("CLM-4").build(),
        ]);

        assert_eq!(claim_ids(&outcome.queue), vec!["CLM-4", "CLM-3", "CLM-1", "CLM-2"]);
        assert_queue_ordered(&outcome.queue);
    }
}

// ============================================================================
// Reject and Rollup Tests
// ============================================================================

mod outcome_tests {
    use super::*;

    #[test]
    fn test_missing_payer_rule_is_rejected_and_batch_continues() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-1").with_payer("UNITED").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-2").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-3").with_status("appealed").build(),
        ]);

        assert_eq!(outcome.classified.len(), 1);
        assert_eq!(outcome.rejects.len(), 2);
        assert_eq!(
            outcome.rejects[0].reason,
            RejectReason::MissingPayerRule {
                payer_id: "UNITED".into()
            }
        );
        assert_eq!(outcome.rejects[1].reason.code(), "NOT_DENIED");
    }

    #[test]
    fn test_foreign_currency_line_is_rejected_and_batch_continues() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-1").build(),
            DenialRecordBuilder::new()
                .with_claim_id("CLM-2")
                .with_balance_money(Money::new(dec!(1000), Currency::CAD))
                .build(),
        ]);

        assert_eq!(claim_ids(&outcome.classified), vec!["CLM-1"]);
        assert_eq!(outcome.rejects.len(), 1);
        assert_eq!(outcome.rejects[0].claim_id, ClaimId::new("CLM-2"));
        assert_eq!(
            outcome.rejects[0].reason,
            RejectReason::CurrencyMismatch {
                currency: Currency::CAD,
                expected: Currency::USD,
            }
        );
        assert_eq!(outcome.rejects[0].reason.code(), "CURRENCY_MISMATCH");
        assert_eq!(outcome.rollup.len(), 1);
        assert_money_eq(&outcome.rollup[0].total_balance, dec!(1000));
    }

    #[test]
    fn test_status_match_is_case_insensitive() {
        let outcome = run(vec![DenialRecordBuilder::new().with_status("DENIED").build()]);
        assert_eq!(outcome.classified.len(), 1);
    }

    #[test]
    fn test_rollup_by_procedure() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-1").with_procedure("97110").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-2").with_procedure("97110").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-3").without_procedure().with_balance(dec!(100)).build(),
        ]);

        assert_eq!(outcome.rollup.len(), 2);
        let therapy = &outcome.rollup[0];
        assert_eq!(therapy.procedure_code, "97110");
        assert_eq!(therapy.count, 2);
        assert_eq!(therapy.high_risk_count, 2);
        assert_money_eq(&therapy.total_balance, dec!(2000));
        assert_money_eq(&therapy.total_expected_recovery, dec!(1200));
        assert_money_eq(&therapy.total_net_recovery, dec!(892));
        assert_eq!(therapy.avg_recovery_rate, dec!(78.5));
        assert_eq!(outcome.rollup[1].procedure_code, "<unknown>");
    }

    #[test]
    fn test_action_summary() {
        let outcome = run(vec![
            DenialRecordBuilder::new().with_claim_id("CLM-1").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-2").build(),
            DenialRecordBuilder::new().with_claim_id("CLM-3").with_denial_code("PR-3").build(),
        ]);

        assert_eq!(outcome.summary.count(ActionClass::Actionable), 2);
        assert_eq!(outcome.summary.count(ActionClass::Excluded), 1);
        assert_eq!(outcome.summary.total(), 3);
        assert_eq!(
            outcome.summary.by_action[&ActionClass::Actionable].net_recovery,
            dec!(892.00)
        );
    }

    #[test]
    fn test_rows_serialize_with_labels() {
        let outcome = run(vec![DenialRecordBuilder::new().with_remark("M127").build()]);
        let rows: Vec<TriageRow> = outcome.queue_rows();

        assert_eq!(rows[0].expected_recovery, dec!(600.00));
        assert_eq!(rows[0].net_recovery, dec!(446.00));
        assert_eq!(rows[0].remark_action.as_deref(), Some("Attach medical records"));
        assert_eq!(rows[0].appeal_deadline_days, 120);
        assert_eq!(rows[0].days_since_denial, 60);

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["action"], "ACTIONABLE");
        assert_eq!(json["time_sensitivity"], "STANDARD");
        assert_eq!(json["denial_kind"], "SOFT");
        assert_eq!(json["priority_tier"], 1);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn ranking_is_total_and_queue_is_ordered(records in record_batch_strategy(40)) {
            let outcome = run(records.clone());

            prop_assert_eq!(outcome.classified.len(), records.len());
            assert_total_ranking(&outcome.classified);
            assert_queue_ordered(&outcome.queue);
            assert_queue_admission(&outcome.queue, 100, &ActionClass::default_queue_actions());
        }

        #[test]
        fn queue_is_deterministic(records in record_batch_strategy(30)) {
            let first = run(records.clone());
            let second = run(records);

            prop_assert_eq!(first.queue_rows(), second.queue_rows());
            prop_assert_eq!(first.classified_rows(), second.classified_rows());
        }

        #[test]
        fn growing_top_n_never_removes_rows(records in record_batch_strategy(30), top_n in 0usize..30) {
            let config = |n: usize| TriageConfig { top_n_financial: n, ..Default::default() };
            let smaller = run_with(config(top_n), records.clone());
            let larger = run_with(config(top_n + 1), records);

            let larger_ranks: BTreeSet<usize> = larger.queue.iter().map(|d| d.financial_rank).collect();
            for denial in &smaller.queue {
                prop_assert!(larger_ranks.contains(&denial.financial_rank));
            }
        }

        #[test]
        fn critical_queued_actions_always_enter_queue(records in record_batch_strategy(30)) {
            let config = TriageConfig { top_n_financial: 0, ..Default::default() };
            let outcome = run_with(config, records);
            let queued = ActionClass::default_queue_actions();

            let expected: BTreeSet<usize> = outcome
                .classified
                .iter()
                .filter(|d| d.classification.time_sensitivity.is_critical())
                .filter(|d| queued.contains(&d.classification.action))
                .map(|d| d.financial_rank)
                .collect();
            let actual: BTreeSet<usize> = outcome.queue.iter().map(|d| d.financial_rank).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
