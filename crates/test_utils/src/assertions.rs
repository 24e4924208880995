//! Custom Test Assertions
//!
//! Ordering and admission checks for triage output, with messages that
//! name the offending rows.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_denials::{ActionClass, ClassifiedDenial};

/// Asserts that a Money value has the expected amount at currency precision
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.round_to_currency().amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts financial ranks are 1..=n and follow expected recovery descending
pub fn assert_total_ranking(classified: &[ClassifiedDenial<'_>]) {
    for (index, denial) in classified.iter().enumerate() {
        assert_eq!(
            denial.financial_rank,
            index + 1,
            "Rank gap at claim {}",
            denial.scored.enriched.record.claim_id
        );
    }
    for pair in classified.windows(2) {
        let (a, b) = (&pair[0].scored, &pair[1].scored);
        assert!(
            a.expected_recovery.amount() >= b.expected_recovery.amount(),
            "Ranking out of order: {} ({}) before {} ({})",
            a.enriched.record.claim_id,
            a.expected_recovery,
            b.enriched.record.claim_id,
            b.expected_recovery
        );
    }
}

/// Asserts the queue ordering keys never go backwards
pub fn assert_queue_ordered(queue: &[ClassifiedDenial<'_>]) {
    for pair in queue.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let key = |d: &ClassifiedDenial<'_>| {
            (
                !d.classification.time_sensitivity.is_critical(),
                d.classification.action,
                -d.scored.net_recovery.amount(),
                d.financial_rank,
            )
        };
        assert!(
            key(a) < key(b),
            "Queue out of order: rank {} before rank {}",
            a.financial_rank,
            b.financial_rank
        );
    }
}

/// Asserts every queued row passed the rank-or-critical and action filters
pub fn assert_queue_admission(
    queue: &[ClassifiedDenial<'_>],
    top_n: usize,
    include_actions: &BTreeSet<ActionClass>,
) {
    for denial in queue {
        assert!(
            denial.financial_rank <= top_n || denial.classification.time_sensitivity.is_critical(),
            "Rank {} is outside the top {} and not critical",
            denial.financial_rank,
            top_n
        );
        assert!(
            include_actions.contains(&denial.classification.action),
            "Action {} is not queued",
            denial.classification.action
        );
    }
}
