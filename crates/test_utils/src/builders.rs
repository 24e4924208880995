//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Currency, DenialCode, Money, PayerId, ProcedureCode, Rate, RemarkCode};
use domain_catalog::{DenialKind, DenialTaxonomyEntry, PayerRule, PriorityTier};
use domain_denials::DenialRecord;

use crate::fixtures::TriageFixtures;

/// Builder for denied claim lines
///
/// Defaults to a $1,000 MEDICARE line denied with `CO-16` sixty days
/// before [`TriageFixtures::as_of`].
pub struct DenialRecordBuilder {
    claim_id: ClaimId,
    payer_id: PayerId,
    procedure_code: Option<ProcedureCode>,
    denial_code: DenialCode,
    remark_code: Option<RemarkCode>,
    balance: Money,
    denial_date: NaiveDate,
    status: String,
}

impl Default for DenialRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DenialRecordBuilder {
    pub fn new() -> Self {
        Self {
            claim_id: ClaimId::new("CLM-0001"),
            payer_id: PayerId::new("MEDICARE"),
            procedure_code: Some(ProcedureCode::new("99214")),
            denial_code: DenialCode::new("CO-16"),
            remark_code: None,
            balance: Money::new(dec!(1000.00), Currency::USD),
            denial_date: TriageFixtures::as_of() - chrono::Duration::days(60),
            status: "denied".to_string(),
        }
    }

    pub fn with_claim_id(mut self, claim_id: impl Into<ClaimId>) -> Self {
        self.claim_id = claim_id.into();
        self
    }

    pub fn with_payer(mut self, payer_id: impl Into<PayerId>) -> Self {
        self.payer_id = payer_id.into();
        self
    }

    pub fn with_procedure(mut self, code: impl Into<ProcedureCode>) -> Self {
        self.procedure_code = Some(code.into());
        self
    }

    pub fn without_procedure(mut self) -> Self {
        self.procedure_code = None;
        self
    }

    pub fn with_denial_code(mut self, code: impl Into<DenialCode>) -> Self {
        self.denial_code = code.into();
        self
    }

    pub fn with_remark(mut self, code: impl Into<RemarkCode>) -> Self {
        self.remark_code = Some(code.into());
        self
    }

    /// Sets a USD balance
    pub fn with_balance(mut self, amount: Decimal) -> Self {
        self.balance = Money::new(amount, Currency::USD);
        self
    }

    pub fn with_balance_money(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_denial_date(mut self, date: NaiveDate) -> Self {
        self.denial_date = date;
        self
    }

    /// Dates the denial so its deadline falls `days_remaining` days after as-of
    pub fn due_in(mut self, payer_deadline_days: i64, days_remaining: i64) -> Self {
        self.denial_date = TriageFixtures::denial_date_for(payer_deadline_days, days_remaining);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn build(self) -> DenialRecord {
        DenialRecord {
            claim_id: self.claim_id,
            payer_id: self.payer_id,
            procedure_code: self.procedure_code,
            denial_code: self.denial_code,
            remark_code: self.remark_code,
            balance: self.balance,
            denial_date: self.denial_date,
            status: self.status,
        }
    }
}

/// Builder for taxonomy entries, starting from the unmatched-code fallback
pub struct TaxonomyEntryBuilder {
    entry: DenialTaxonomyEntry,
}

impl TaxonomyEntryBuilder {
    pub fn new(code: &str) -> Self {
        Self {
            entry: DenialTaxonomyEntry::fallback(&DenialCode::new(code), dec!(50), dec!(30)),
        }
    }

    pub fn with_kind(mut self, kind: DenialKind) -> Self {
        self.entry.denial_kind = kind;
        self
    }

    pub fn with_recovery_rate(mut self, rate: Decimal) -> Self {
        self.entry.avg_recovery_rate = rate;
        self
    }

    pub fn with_rework_cost(mut self, cost: Decimal) -> Self {
        self.entry.avg_rework_cost = cost;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.entry.category = Some(category.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.entry.routing_department = department.into();
        self
    }

    pub fn with_tier(mut self, tier: PriorityTier) -> Self {
        self.entry.priority_tier = tier;
        self
    }

    pub fn build(self) -> DenialTaxonomyEntry {
        self.entry
    }
}

/// Builder for payer rules; defaults to a 120-day window at 50% yield
pub struct PayerRuleBuilder {
    payer_id: PayerId,
    appeal_deadline_days: i32,
    yield_rate: Decimal,
}

impl PayerRuleBuilder {
    pub fn new(payer_id: &str) -> Self {
        Self {
            payer_id: PayerId::new(payer_id),
            appeal_deadline_days: 120,
            yield_rate: dec!(0.5),
        }
    }

    pub fn with_deadline_days(mut self, days: i32) -> Self {
        self.appeal_deadline_days = days;
        self
    }

    pub fn with_yield(mut self, yield_rate: Decimal) -> Self {
        self.yield_rate = yield_rate;
        self
    }

    pub fn build(self) -> PayerRule {
        PayerRule::new(self.payer_id, self.appeal_deadline_days, Rate::new(self.yield_rate))
    }
}
