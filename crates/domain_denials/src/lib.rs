//! Denial Triage Domain
//!
//! This crate turns denied claim lines into a ranked recovery work queue.
//!
//! # Pipeline
//!
//! ```text
//! DenialRecord -> Enrichment -> Scoring -> Classification -> Ranking -> Queue Builder
//!                 (taxonomy,    (expected/   (EXCLUDED |        (financial   (top-N or
//!                  procedure,    net value,   ACTIONABLE |       rank, per-   CRITICAL,
//!                  remark)       deadline)    CONDITIONAL |      payer rank)  filtered,
//!                                             WRITE-OFF | REVIEW)             ordered)
//! ```
//!
//! Enrichment, scoring and classification are pure per-record functions over
//! the read-only [`domain_catalog::ReferenceCatalogs`]. Ranking is the single
//! pass that needs the complete candidate set. [`TriageEngine`] runs the whole
//! pipeline and collects per-record failures into a reject list instead of
//! aborting the batch.

pub mod record;
pub mod enrichment;
pub mod scoring;
pub mod classification;
pub mod ranking;
pub mod queue;
pub mod rollup;
pub mod rows;
pub mod config;
pub mod pipeline;
pub mod error;

pub use record::DenialRecord;
pub use enrichment::{enrich, EnrichedDenial, TaxonomyMatch};
pub use scoring::{score, ScoredDenial, CRITICAL_DEADLINE_DAYS};
pub use classification::{ActionClass, Classification, ClassificationPolicy, TimeSensitivity};
pub use ranking::{rank_classified, ClassifiedDenial, PayerRank};
pub use queue::{build_queue, QueueCriteria};
pub use rollup::{rollup_by_procedure, ActionSummary, ProcedureRollup};
pub use rows::TriageRow;
pub use config::TriageConfig;
pub use pipeline::{TriageEngine, TriageOutcome};
pub use error::{RejectReason, RejectedDenial, TriageError};
