//! Flat output rows for the classified set and the work queue

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{ClaimId, DenialCode, Money, PayerId, ProcedureCode, RemarkCode};
use domain_catalog::{DenialKind, RiskLevel};
use crate::classification::{ActionClass, TimeSensitivity};
use crate::ranking::ClassifiedDenial;

/// One output row; amounts are at currency precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageRow {
    pub claim_id: ClaimId,
    pub payer_id: PayerId,
    pub procedure_code: Option<ProcedureCode>,
    pub denial_code: DenialCode,
    pub remark_code: Option<RemarkCode>,
    pub currency: String,
    pub balance: Decimal,
    pub expected_recovery: Decimal,
    pub net_recovery: Decimal,
    pub category: String,
    pub denial_kind: DenialKind,
    pub taxonomy_matched: bool,
    pub action: ActionClass,
    pub routing_department: String,
    pub recommended_action: String,
    pub remark_action: Option<String>,
    pub financial_rank: usize,
    pub rank_in_payer: usize,
    pub payer_count: usize,
    pub payer_percentile: Decimal,
    pub time_sensitivity: TimeSensitivity,
    pub priority_tier: u8,
    pub avg_recovery_rate: Decimal,
    pub rework_cost: Decimal,
    pub denial_date: NaiveDate,
    pub deadline_date: NaiveDate,
    pub appeal_deadline_days: i32,
    pub days_remaining: i64,
    pub days_since_denial: i64,
    pub denial_risk: Option<RiskLevel>,
    pub recovery_potential: Option<RiskLevel>,
}

/// Rounded and padded to the currency's minor units, so `446` prints as `446.00`
fn currency_amount(money: &Money) -> Decimal {
    let mut amount = money.round_to_currency().amount();
    amount.rescale(money.currency().decimal_places());
    amount
}

impl From<&ClassifiedDenial<'_>> for TriageRow {
    fn from(denial: &ClassifiedDenial<'_>) -> Self {
        let scored = &denial.scored;
        let enriched = &scored.enriched;
        let record = &enriched.record;
        let taxonomy = enriched.taxonomy.entry();

        Self {
            claim_id: record.claim_id.clone(),
            payer_id: record.payer_id.clone(),
            procedure_code: record.procedure().cloned(),
            denial_code: record.denial_code.clone(),
            remark_code: record.remark().cloned(),
            currency: record.balance.currency().to_string(),
            balance: currency_amount(&record.balance),
            expected_recovery: currency_amount(&scored.expected_recovery),
            net_recovery: currency_amount(&scored.net_recovery),
            category: denial.classification.category.clone(),
            denial_kind: taxonomy.denial_kind,
            taxonomy_matched: enriched.taxonomy.is_matched(),
            action: denial.classification.action,
            routing_department: taxonomy.routing_department.clone(),
            recommended_action: taxonomy.recommended_action.clone(),
            remark_action: enriched.remark.map(|remark| remark.required_action.clone()),
            financial_rank: denial.financial_rank,
            rank_in_payer: denial.payer_rank.rank_in_payer,
            payer_count: denial.payer_rank.payer_count,
            payer_percentile: denial.payer_rank.payer_percentile,
            time_sensitivity: denial.classification.time_sensitivity,
            priority_tier: taxonomy.priority_tier.as_u8(),
            avg_recovery_rate: taxonomy.avg_recovery_rate,
            rework_cost: taxonomy.avg_rework_cost,
            denial_date: record.denial_date,
            deadline_date: scored.deadline_date,
            appeal_deadline_days: scored.payer_rule.appeal_deadline_days,
            days_remaining: scored.days_remaining,
            days_since_denial: scored.days_since_denial,
            denial_risk: enriched.profile.map(|profile| profile.denial_risk),
            recovery_potential: enriched.profile.map(|profile| profile.recovery_potential),
        }
    }
}
