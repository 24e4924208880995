//! Property-Based Test Generators
//!
//! Proptest strategies for denial records that resolve against
//! [`CatalogFixtures::standard`](crate::fixtures::CatalogFixtures::standard).

use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, Currency, DenialCode, Money, PayerId, ProcedureCode};
use domain_denials::DenialRecord;

use crate::fixtures::TriageFixtures;

/// Codes from the standard taxonomy plus one it does not know
pub fn denial_code_strategy() -> impl Strategy<Value = DenialCode> {
    prop_oneof![
        Just("CO-16"),
        Just("CO-197"),
        Just("CO-50"),
        Just("CO-29"),
        Just("OA-23"),
        Just("PR-1"),
        Just("PR-2"),
        Just("PR-3"),
        Just("CO-999"),
    ]
    .prop_map(DenialCode::new)
}

/// Payers with a rule in the standard catalogs
pub fn payer_strategy() -> impl Strategy<Value = PayerId> {
    prop_oneof![Just("MEDICARE"), Just("AETNA"), Just("BCBS"), Just("CIGNA")].prop_map(PayerId::new)
}

pub fn procedure_strategy() -> impl Strategy<Value = Option<ProcedureCode>> {
    prop_oneof![
        Just(None),
        Just(Some("99214")),
        Just(Some("97110")),
        Just(Some("70553")),
        Just(Some("36415")),
    ]
    .prop_map(|code| code.map(ProcedureCode::new))
}

/// Balances between $1.00 and $50,000.00
pub fn balance_strategy() -> impl Strategy<Value = Money> {
    (100i64..5_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Recovery rates in percent with one decimal place
pub fn recovery_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1000i64).prop_map(|tenths| Decimal::new(tenths, 1))
}

/// A denied record dated up to a year before the fixture as-of date
pub fn denial_record_strategy() -> impl Strategy<Value = DenialRecord> {
    (
        0u32..500u32,
        payer_strategy(),
        procedure_strategy(),
        denial_code_strategy(),
        balance_strategy(),
        0i64..365i64,
    )
        .prop_map(|(claim, payer_id, procedure_code, denial_code, balance, age)| DenialRecord {
            claim_id: ClaimId::new(format!("CLM-{claim:04}")),
            payer_id,
            procedure_code,
            denial_code,
            remark_code: None,
            balance,
            denial_date: TriageFixtures::as_of() - Duration::days(age),
            status: "denied".to_string(),
        })
}

/// Batches of up to `max` records; claim ids may repeat
pub fn record_batch_strategy(max: usize) -> impl Strategy<Value = Vec<DenialRecord>> {
    prop::collection::vec(denial_record_strategy(), 0..=max)
}
