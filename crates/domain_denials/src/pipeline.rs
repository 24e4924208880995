//! End-to-end triage run

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use core_kernel::RunId;
use domain_catalog::ReferenceCatalogs;
use crate::classification::{ActionClass, Classification, ClassificationPolicy};
use crate::config::TriageConfig;
use crate::enrichment::enrich;
use crate::error::{RejectReason, RejectedDenial, TriageError};
use crate::queue::build_queue;
use crate::ranking::{rank_classified, ClassifiedDenial};
use crate::record::DenialRecord;
use crate::rollup::{rollup_by_procedure, ActionSummary, ProcedureRollup};
use crate::rows::TriageRow;
use crate::scoring::{score, ScoredDenial};

/// Everything a triage run produces
#[derive(Debug, Clone)]
pub struct TriageOutcome<'c> {
    pub run_id: RunId,
    pub as_of: NaiveDate,
    /// Full audit set in financial-rank order
    pub classified: Vec<ClassifiedDenial<'c>>,
    /// Ordered work queue
    pub queue: Vec<ClassifiedDenial<'c>>,
    pub rejects: Vec<RejectedDenial>,
    pub rollup: Vec<ProcedureRollup>,
    pub summary: ActionSummary,
}

impl<'c> TriageOutcome<'c> {
    pub fn classified_rows(&self) -> Vec<TriageRow> {
        self.classified.iter().map(TriageRow::from).collect()
    }

    pub fn queue_rows(&self) -> Vec<TriageRow> {
        self.queue.iter().map(TriageRow::from).collect()
    }

    /// Records read, whether classified or rejected
    pub fn record_count(&self) -> usize {
        self.classified.len() + self.rejects.len()
    }
}

enum Processed<'c> {
    Candidate(ScoredDenial<'c>, Classification),
    Rejected(RejectedDenial),
}

/// Runs the triage pipeline over validated reference catalogs
#[derive(Debug, Clone)]
pub struct TriageEngine<'c> {
    config: TriageConfig,
    policy: ClassificationPolicy,
    include_actions: BTreeSet<ActionClass>,
    catalogs: &'c ReferenceCatalogs,
}

impl<'c> TriageEngine<'c> {
    /// Validates the configuration and catalogs up front
    ///
    /// Any problem here is fatal; nothing is processed with a bad rule set.
    pub fn new(config: TriageConfig, catalogs: &'c ReferenceCatalogs) -> Result<Self, TriageError> {
        config.validate()?;
        catalogs.validate()?;

        Ok(Self {
            policy: config.policy(),
            include_actions: config.include_action_set()?,
            config,
            catalogs,
        })
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &'c ReferenceCatalogs {
        self.catalogs
    }

    /// Triage a batch of claim lines as of `as_of`
    ///
    /// Lines that cannot be triaged land on the reject list with a reason,
    /// including lines in a currency other than the configured one, so the
    /// ranking and rollup only ever compare amounts of one currency. Only
    /// configuration errors abort the run.
    pub fn run(&self, records: Vec<DenialRecord>, as_of: NaiveDate) -> Result<TriageOutcome<'c>, TriageError> {
        let run_id = RunId::new_v7();
        let span = info_span!("triage_run", %run_id, %as_of);
        let _guard = span.enter();

        info!(records = records.len(), "Starting triage run");

        let processed = self.process_all(records, as_of)?;

        let mut candidates = Vec::with_capacity(processed.len());
        let mut rejects = Vec::new();
        for item in processed {
            match item {
                Processed::Candidate(scored, classification) => candidates.push((scored, classification)),
                Processed::Rejected(rejected) => {
                    warn!(
                        claim_id = %rejected.claim_id,
                        payer_id = %rejected.payer_id,
                        reason = rejected.reason.code(),
                        "Record rejected: {}",
                        rejected.reason
                    );
                    rejects.push(rejected);
                }
            }
        }
        debug!(candidates = candidates.len(), "Records scored and classified");

        let classified = rank_classified(candidates);
        let queue = build_queue(&classified, self.config.top_n_financial, &self.include_actions);
        let rollup = rollup_by_procedure(&classified)?;
        let summary = ActionSummary::from_classified(&classified);

        info!(
            classified = classified.len(),
            queued = queue.len(),
            rejected = rejects.len(),
            actionable = summary.count(ActionClass::Actionable),
            conditional = summary.count(ActionClass::Conditional),
            review = summary.count(ActionClass::Review),
            "Triage run complete"
        );

        Ok(TriageOutcome {
            run_id,
            as_of,
            classified,
            queue,
            rejects,
            rollup,
            summary,
        })
    }

    #[cfg(feature = "parallel")]
    fn process_all(&self, records: Vec<DenialRecord>, as_of: NaiveDate) -> Result<Vec<Processed<'c>>, TriageError> {
        records
            .into_par_iter()
            .map(|record| self.process(record, as_of))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn process_all(&self, records: Vec<DenialRecord>, as_of: NaiveDate) -> Result<Vec<Processed<'c>>, TriageError> {
        records
            .into_iter()
            .map(|record| self.process(record, as_of))
            .collect()
    }

    fn process(&self, record: DenialRecord, as_of: NaiveDate) -> Result<Processed<'c>, TriageError> {
        let reject = |record: &DenialRecord, reason: RejectReason| {
            Processed::Rejected(RejectedDenial {
                claim_id: record.claim_id.clone(),
                payer_id: record.payer_id.clone(),
                reason,
            })
        };

        if !record.is_denied() {
            let reason = RejectReason::NotDenied {
                status: record.status.clone(),
            };
            return Ok(reject(&record, reason));
        }

        let currency = record.balance.currency();
        if currency != self.config.currency {
            let reason = RejectReason::CurrencyMismatch {
                currency,
                expected: self.config.currency,
            };
            return Ok(reject(&record, reason));
        }

        let Some(payer_rule) = self.catalogs.payer_rule(&record.payer_id) else {
            let reason = RejectReason::MissingPayerRule {
                payer_id: record.payer_id.clone(),
            };
            return Ok(reject(&record, reason));
        };

        let claim_id = record.claim_id.clone();
        let payer_id = record.payer_id.clone();
        let rejected = |reason: RejectReason| {
            Processed::Rejected(RejectedDenial {
                claim_id: claim_id.clone(),
                payer_id: payer_id.clone(),
                reason,
            })
        };

        let enriched = enrich(
            record,
            self.catalogs,
            self.config.default_recovery_rate,
            self.config.default_rework_cost,
        );

        let scored = match score(enriched, payer_rule, as_of, self.config.critical_deadline_days) {
            Ok(scored) => scored,
            Err(TriageError::Temporal(err)) => {
                return Ok(rejected(RejectReason::InvalidDenialDate {
                    detail: err.to_string(),
                }));
            }
            Err(err) => return Err(err),
        };

        if let Some(max_days) = self.config.max_days_past_deadline {
            let days_past = -scored.days_remaining;
            if days_past > i64::from(max_days) {
                return Ok(rejected(RejectReason::OutsideFilingWindow { days_past }));
            }
        }

        let classification = self.policy.classify(&scored);
        Ok(Processed::Candidate(scored, classification))
    }
}
