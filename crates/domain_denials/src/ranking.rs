//! Financial ranking
//!
//! Ranking is the one step that needs the complete candidate set of a run.
//! Denials are ordered by expected recovery descending, ties broken by claim
//! id ascending and then by input position, and numbered from 1. Within each
//! payer the same order yields a per-payer rank and percentile.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::PayerId;
use crate::classification::Classification;
use crate::scoring::ScoredDenial;

/// Position of a denial among its payer's denials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayerRank {
    /// 1-based rank within the payer
    pub rank_in_payer: usize,
    pub payer_count: usize,
    /// (rank_in_payer - 1) / (payer_count - 1), 0 for a payer's only denial
    pub payer_percentile: Decimal,
}

impl PayerRank {
    fn new(rank_in_payer: usize, payer_count: usize) -> Self {
        let payer_percentile = if payer_count > 1 {
            (Decimal::from(rank_in_payer - 1) / Decimal::from(payer_count - 1)).round_dp(4)
        } else {
            Decimal::ZERO
        };
        Self {
            rank_in_payer,
            payer_count,
            payer_percentile,
        }
    }
}

/// A scored, classified and ranked denial; the terminal artifact of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedDenial<'c> {
    pub scored: ScoredDenial<'c>,
    pub classification: Classification,
    /// 1-based rank by expected recovery across the whole run
    pub financial_rank: usize,
    pub payer_rank: PayerRank,
}

fn financial_order(a: &ScoredDenial<'_>, b: &ScoredDenial<'_>) -> Ordering {
    b.expected_recovery
        .amount()
        .cmp(&a.expected_recovery.amount())
        .then_with(|| a.enriched.record.claim_id.cmp(&b.enriched.record.claim_id))
}

/// Assigns financial and per-payer ranks to a run's full candidate set
///
/// The result is in financial-rank order. The sort is stable, so denials
/// with equal expected recovery and claim id keep their input order.
pub fn rank_classified<'c>(
    candidates: Vec<(ScoredDenial<'c>, Classification)>,
) -> Vec<ClassifiedDenial<'c>> {
    let mut candidates = candidates;
    candidates.sort_by(|(a, _), (b, _)| financial_order(a, b));

    let mut payer_counts: HashMap<PayerId, usize> = HashMap::new();
    for (scored, _) in &candidates {
        *payer_counts
            .entry(scored.enriched.record.payer_id.clone())
            .or_default() += 1;
    }

    let mut payer_seen: HashMap<PayerId, usize> = HashMap::new();
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, (scored, classification))| {
            let payer_id = &scored.enriched.record.payer_id;
            let seen = payer_seen.entry(payer_id.clone()).or_default();
            *seen += 1;
            let payer_count = payer_counts.get(payer_id).copied().unwrap_or(*seen);

            ClassifiedDenial {
                payer_rank: PayerRank::new(*seen, payer_count),
                financial_rank: index + 1,
                scored,
                classification,
            }
        })
        .collect()
}
