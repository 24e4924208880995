//! Audit rollups over the full classified set

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{Money, MoneyError};
use crate::classification::ActionClass;
use crate::ranking::ClassifiedDenial;

/// Grouping key for lines without a procedure code
pub const UNKNOWN_PROCEDURE: &str = "<unknown>";

/// Totals for one procedure code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureRollup {
    pub procedure_code: String,
    pub count: usize,
    pub total_balance: Money,
    pub total_expected_recovery: Money,
    pub total_net_recovery: Money,
    /// Mean of the recovery rates applied to the lines, percent, 2 dp
    pub avg_recovery_rate: Decimal,
    /// Lines whose procedure profile is HIGH denial risk
    pub high_risk_count: usize,
}

#[derive(Default)]
struct Accumulator<'a> {
    balances: Vec<&'a Money>,
    expected: Vec<&'a Money>,
    net: Vec<&'a Money>,
    rate_sum: Decimal,
    high_risk: usize,
}

/// Aggregates classified denials by procedure code
///
/// Rows are ordered by total expected recovery descending, then code.
/// All amounts within a procedure must share a currency.
pub fn rollup_by_procedure(classified: &[ClassifiedDenial<'_>]) -> Result<Vec<ProcedureRollup>, MoneyError> {
    let mut groups: HashMap<String, Accumulator<'_>> = HashMap::new();

    for denial in classified {
        let enriched = &denial.scored.enriched;
        let key = enriched
            .record
            .procedure()
            .map(|code| code.to_string())
            .unwrap_or_else(|| UNKNOWN_PROCEDURE.to_string());

        let acc = groups.entry(key).or_default();
        acc.balances.push(&enriched.record.balance);
        acc.expected.push(&denial.scored.expected_recovery);
        acc.net.push(&denial.scored.net_recovery);
        acc.rate_sum += enriched.taxonomy.avg_recovery_rate;
        if enriched.profile.is_some_and(|profile| profile.is_high_risk()) {
            acc.high_risk += 1;
        }
    }

    let mut rows = groups
        .into_iter()
        .map(|(procedure_code, acc)| -> Result<ProcedureRollup, MoneyError> {
            let currency = acc.balances[0].currency();
            let count = acc.balances.len();
            Ok(ProcedureRollup {
                procedure_code,
                count,
                total_balance: Money::try_sum(currency, acc.balances)?,
                total_expected_recovery: Money::try_sum(currency, acc.expected)?,
                total_net_recovery: Money::try_sum(currency, acc.net)?,
                avg_recovery_rate: (acc.rate_sum / Decimal::from(count)).round_dp(2),
                high_risk_count: acc.high_risk,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| {
        b.total_expected_recovery
            .amount()
            .cmp(&a.total_expected_recovery.amount())
            .then_with(|| a.procedure_code.cmp(&b.procedure_code))
    });
    Ok(rows)
}

/// Count and net recovery for one action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionTotals {
    pub count: usize,
    pub net_recovery: Decimal,
}

/// Per-action totals over a run's classified denials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub by_action: BTreeMap<ActionClass, ActionTotals>,
}

impl ActionSummary {
    pub fn from_classified(classified: &[ClassifiedDenial<'_>]) -> Self {
        let mut by_action: BTreeMap<ActionClass, ActionTotals> = BTreeMap::new();
        for denial in classified {
            let totals = by_action.entry(denial.classification.action).or_default();
            totals.count += 1;
            totals.net_recovery += denial.scored.net_recovery.amount();
        }
        Self { by_action }
    }

    pub fn count(&self, action: ActionClass) -> usize {
        self.by_action.get(&action).map_or(0, |totals| totals.count)
    }

    pub fn total(&self) -> usize {
        self.by_action.values().map(|totals| totals.count).sum()
    }
}
