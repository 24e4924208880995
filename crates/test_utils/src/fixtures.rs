//! Pre-built Test Fixtures
//!
//! A small but complete set of reference catalogs covering every
//! classification branch, plus the dates the suites run against.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, DenialCode, Money, PayerId, ProcedureCode, Rate, RemarkCode};
use domain_catalog::{
    AdjustmentGroup, DenialKind, DenialTaxonomyEntry, PayerRule, PriorityTier,
    ProcedureRiskProfile, ReferenceCatalogs, RemarkClass, RemarkEntry, RiskLevel,
};

static STANDARD_CATALOGS: Lazy<ReferenceCatalogs> = Lazy::new(|| {
    ReferenceCatalogs::from_parts(
        CatalogFixtures::taxonomy(),
        CatalogFixtures::remarks(),
        CatalogFixtures::procedures(),
        CatalogFixtures::payer_rules(),
    )
    .expect("standard fixture catalogs are valid")
});

/// Fixture for reference catalog data
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// The standard catalogs, built once per test binary
    pub fn standard() -> &'static ReferenceCatalogs {
        &STANDARD_CATALOGS
    }

    /// Soft denial, 78.5% recovery, $25 rework
    pub fn missing_information() -> DenialTaxonomyEntry {
        entry("CO-16", DenialKind::Soft, dec!(78.5), dec!(25.00), PriorityTier::Tier1)
            .categorized("Billing Error", "Billing", "Add missing information and resubmit")
    }

    /// Soft denial, prior authorization
    pub fn missing_authorization() -> DenialTaxonomyEntry {
        entry("CO-197", DenialKind::Soft, dec!(65.0), dec!(35.00), PriorityTier::Tier1)
            .categorized("Authorization", "Utilization Management", "Obtain retro authorization and appeal")
    }

    /// Hard denial above the conditional threshold
    pub fn medical_necessity() -> DenialTaxonomyEntry {
        entry("CO-50", DenialKind::Hard, dec!(30.0), dec!(45.00), PriorityTier::Tier2)
            .categorized("Medical Necessity", "Clinical Documentation", "Appeal with medical records")
    }

    /// Hard denial below the conditional threshold
    pub fn timely_filing() -> DenialTaxonomyEntry {
        entry("CO-29", DenialKind::Hard, dec!(15.0), dec!(20.00), PriorityTier::Tier3)
            .categorized("Timely Filing", "Billing", "Submit proof of timely filing")
    }

    /// Neither soft nor hard, no category of its own
    pub fn prior_payer_adjustment() -> DenialTaxonomyEntry {
        let mut entry = entry("OA-23", DenialKind::Review, dec!(20.0), dec!(15.00), PriorityTier::Tier3);
        entry.recommended_action = "Verify coordination of benefits".to_string();
        entry
    }

    /// Patient deductible, coinsurance and copay
    pub fn patient_share() -> Vec<DenialTaxonomyEntry> {
        [("PR-1", "Deductible"), ("PR-2", "Coinsurance"), ("PR-3", "Copay")]
            .into_iter()
            .map(|(code, description)| {
                let mut entry = entry(code, DenialKind::Hard, dec!(0), dec!(0), PriorityTier::Tier3)
                    .categorized("Patient Responsibility", "Patient Billing", "Bill patient");
                entry.description = Some(format!("{description} amount"));
                entry
            })
            .collect()
    }

    pub fn taxonomy() -> Vec<DenialTaxonomyEntry> {
        let mut entries = vec![
            Self::missing_information(),
            Self::missing_authorization(),
            Self::medical_necessity(),
            Self::timely_filing(),
            Self::prior_payer_adjustment(),
        ];
        entries.extend(Self::patient_share());
        entries
    }

    pub fn remarks() -> Vec<RemarkEntry> {
        vec![
            RemarkEntry {
                code: RemarkCode::new("M127"),
                classification: RemarkClass::Supplemental,
                description: Some("Missing patient medical record for this service".to_string()),
                required_action: "Attach medical records".to_string(),
                paired_codes: [DenialCode::new("CO-16"), DenialCode::new("CO-50")].into(),
            },
            RemarkEntry {
                code: RemarkCode::new("N130"),
                classification: RemarkClass::Alert,
                description: None,
                required_action: "Review payer policy".to_string(),
                paired_codes: Default::default(),
            },
        ]
    }

    pub fn procedures() -> Vec<ProcedureRiskProfile> {
        vec![
            profile("99214", "Primary Care", RiskLevel::Medium, dec!(8.5), RiskLevel::High),
            profile("97110", "Physical Therapy", RiskLevel::High, dec!(18.0), RiskLevel::Medium),
            profile("70553", "Radiology", RiskLevel::High, dec!(22.0), RiskLevel::Low),
        ]
    }

    pub fn payer_rules() -> Vec<PayerRule> {
        vec![
            PayerRule::new("MEDICARE", 120, Rate::new(dec!(0.6))),
            PayerRule::new("AETNA", 180, Rate::new(dec!(0.5))),
            PayerRule::new("BCBS", 90, Rate::new(dec!(0.55))),
            PayerRule::new("CIGNA", 30, Rate::new(dec!(0.4))),
        ]
    }
}

/// Fixture for dates and amounts
pub struct TriageFixtures;

impl TriageFixtures {
    /// The "today" of every scenario
    pub fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date")
    }

    /// Denial date whose appeal deadline lands `days_remaining` days after [`Self::as_of`]
    pub fn denial_date_for(payer_deadline_days: i64, days_remaining: i64) -> NaiveDate {
        Self::as_of() + chrono::Duration::days(days_remaining - payer_deadline_days)
    }

    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    pub fn medicare() -> PayerId {
        PayerId::new("MEDICARE")
    }
}

trait Categorized {
    fn categorized(self, category: &str, department: &str, action: &str) -> Self;
}

impl Categorized for DenialTaxonomyEntry {
    fn categorized(mut self, category: &str, department: &str, action: &str) -> Self {
        self.category = Some(category.to_string());
        self.routing_department = department.to_string();
        self.recommended_action = action.to_string();
        self
    }
}

fn entry(
    code: &str,
    kind: DenialKind,
    rate: Decimal,
    cost: Decimal,
    tier: PriorityTier,
) -> DenialTaxonomyEntry {
    let code = DenialCode::new(code);
    DenialTaxonomyEntry {
        group: code
            .group_prefix()
            .and_then(AdjustmentGroup::from_prefix)
            .unwrap_or(AdjustmentGroup::Other),
        code,
        denial_kind: kind,
        category: None,
        description: None,
        recommended_action: String::new(),
        routing_department: "Technical/Administrative".to_string(),
        avg_recovery_rate: rate,
        avg_rework_cost: cost,
        priority_tier: tier,
    }
}

fn profile(
    code: &str,
    specialty: &str,
    risk: RiskLevel,
    rate: Decimal,
    recovery: RiskLevel,
) -> ProcedureRiskProfile {
    ProcedureRiskProfile {
        procedure_code: ProcedureCode::new(code),
        specialty: specialty.to_string(),
        denial_risk: risk,
        common_denial_codes: vec![DenialCode::new("CO-16")],
        denial_rate_pct: rate,
        root_cause: "Documentation gaps".to_string(),
        prevention: "Pre-submission review".to_string(),
        recovery_potential: recovery,
    }
}
