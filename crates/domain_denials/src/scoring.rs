//! Financial scoring
//!
//! ```text
//! expected_recovery = balance × payer yield
//! net_recovery      = round2(expected_recovery × avg_recovery_rate / 100 − avg_rework_cost)
//! deadline_date     = denial_date + payer appeal window
//! days_remaining    = deadline_date − as_of      (negative once the deadline has passed)
//! is_urgent         = days_remaining < critical_deadline_days
//! ```
//!
//! Negative net value and a passed deadline are both legitimate outcomes;
//! they are carried forward for classification and the queue to act on.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_catalog::PayerRule;
use crate::enrichment::EnrichedDenial;
use crate::error::TriageError;

/// Default urgency threshold in days; configurable per run
pub const CRITICAL_DEADLINE_DAYS: u32 = 10;

/// An enriched denial with its recovery value and deadline position
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDenial<'c> {
    pub enriched: EnrichedDenial<'c>,
    pub payer_rule: &'c PayerRule,
    pub expected_recovery: Money,
    pub net_recovery: Money,
    pub deadline_date: NaiveDate,
    pub days_remaining: i64,
    pub days_since_denial: i64,
    pub is_urgent: bool,
}

/// Net recovery value at currency precision, midpoint away from zero
pub fn net_recovery_value(
    expected_recovery: Decimal,
    avg_recovery_rate: Decimal,
    avg_rework_cost: Decimal,
) -> Decimal {
    (expected_recovery * avg_recovery_rate / dec!(100) - avg_rework_cost)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Scores one enriched denial against its payer's rule
///
/// A yield outside [0,1] or a negative appeal window is a configuration
/// error and is returned as such, never clamped.
pub fn score<'c>(
    enriched: EnrichedDenial<'c>,
    payer_rule: &'c PayerRule,
    as_of: NaiveDate,
    critical_deadline_days: u32,
) -> Result<ScoredDenial<'c>, TriageError> {
    let balance = &enriched.record.balance;
    let expected_recovery = payer_rule.expected_recovery(balance)?;

    let taxonomy = enriched.taxonomy.entry();
    let net_recovery = Money::new(
        net_recovery_value(
            expected_recovery.amount(),
            taxonomy.avg_recovery_rate,
            taxonomy.avg_rework_cost,
        ),
        balance.currency(),
    );

    let window = payer_rule.appeal_window(enriched.record.denial_date)?;
    let deadline_date = window.deadline_date()?;
    let days_remaining = window.days_remaining(as_of)?;
    let days_since_denial = window.days_since_denial(as_of);

    Ok(ScoredDenial {
        enriched,
        payer_rule,
        expected_recovery,
        net_recovery,
        deadline_date,
        days_remaining,
        days_since_denial,
        is_urgent: days_remaining < i64::from(critical_deadline_days),
    })
}
