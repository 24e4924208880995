//! Batch front end for denial triage
//!
//! Reads the reference catalogs and denied claim lines from JSON files,
//! runs [`domain_denials::TriageEngine`] and writes the classified set,
//! the work queue, rejects and the procedure rollup as JSON.
//!
//! Remittance parsing is out of scope; records arrive already extracted.

pub mod config;
pub mod loader;
pub mod output;
pub mod telemetry;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;

use core_kernel::RunId;
use domain_denials::TriageEngine;

pub use config::{BatchConfig, InputPaths, LogFormat};

/// What a batch run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub run_id: RunId,
    pub as_of: NaiveDate,
    pub classified: usize,
    pub queued: usize,
    pub rejected: usize,
    pub files: Vec<PathBuf>,
}

/// Loads inputs, runs triage and writes the result files
pub fn run_batch(config: &BatchConfig) -> anyhow::Result<BatchReport> {
    let catalogs = loader::load_catalogs(&config.inputs)?;
    info!(stats = ?catalogs.stats(), "Reference catalogs loaded");

    let records = loader::load_records(&config.inputs.records)?;
    let as_of = config.as_of();

    let engine = TriageEngine::new(config.engine.clone(), &catalogs)
        .context("invalid triage configuration")?;
    let outcome = engine.run(records, as_of).context("triage run failed")?;

    let files = output::write_outcome(&config.output_dir, &outcome)?;
    info!(
        run_id = %outcome.run_id,
        output_dir = %config.output_dir.display(),
        "Results written"
    );

    Ok(BatchReport {
        run_id: outcome.run_id,
        as_of,
        classified: outcome.classified.len(),
        queued: outcome.queue.len(),
        rejected: outcome.rejects.len(),
        files,
    })
}
