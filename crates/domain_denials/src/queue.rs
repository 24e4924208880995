//! Work queue builder
//!
//! A denial enters the queue when it ranks within the top N by expected
//! recovery, or when its deadline is critical regardless of rank, and its
//! action is one of the queued actions. The queue is ordered by:
//!
//! 1. time sensitivity, CRITICAL before STANDARD
//! 2. action label ascending
//! 3. net recovery descending
//! 4. financial rank ascending, so the order is total

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::classification::ActionClass;
use crate::ranking::ClassifiedDenial;

/// Filter parameters of the work queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueCriteria {
    pub top_n: usize,
    pub include_actions: BTreeSet<ActionClass>,
}

impl Default for QueueCriteria {
    fn default() -> Self {
        Self {
            top_n: 100,
            include_actions: ActionClass::default_queue_actions(),
        }
    }
}

impl QueueCriteria {
    pub fn admits(&self, denial: &ClassifiedDenial<'_>) -> bool {
        let in_window = denial.financial_rank <= self.top_n
            || denial.classification.time_sensitivity.is_critical();
        in_window && self.include_actions.contains(&denial.classification.action)
    }
}

fn queue_order(a: &ClassifiedDenial<'_>, b: &ClassifiedDenial<'_>) -> Ordering {
    let critical_first = b
        .classification
        .time_sensitivity
        .is_critical()
        .cmp(&a.classification.time_sensitivity.is_critical());

    critical_first
        .then_with(|| a.classification.action.cmp(&b.classification.action))
        .then_with(|| {
            b.scored
                .net_recovery
                .amount()
                .cmp(&a.scored.net_recovery.amount())
        })
        .then_with(|| a.financial_rank.cmp(&b.financial_rank))
}

/// Builds the ordered work queue from a run's classified denials
///
/// The input is left untouched; the queue holds copies of the admitted rows.
pub fn build_queue<'c>(
    classified: &[ClassifiedDenial<'c>],
    top_n: usize,
    include_actions: &BTreeSet<ActionClass>,
) -> Vec<ClassifiedDenial<'c>> {
    let criteria = QueueCriteria {
        top_n,
        include_actions: include_actions.clone(),
    };

    let mut queue: Vec<ClassifiedDenial<'c>> = classified
        .iter()
        .filter(|denial| criteria.admits(denial))
        .cloned()
        .collect();
    queue.sort_by(queue_order);
    queue
}
