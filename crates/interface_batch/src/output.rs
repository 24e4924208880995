//! Result files

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::RunId;
use domain_denials::{ActionSummary, TriageOutcome};

pub const CLASSIFIED_FILE: &str = "classified.json";
pub const QUEUE_FILE: &str = "queue.json";
pub const REJECTS_FILE: &str = "rejects.json";
pub const ROLLUP_FILE: &str = "rollup.json";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Serialize)]
struct RunSummary<'a> {
    run_id: RunId,
    as_of: NaiveDate,
    records: usize,
    classified: usize,
    queued: usize,
    rejected: usize,
    actions: &'a ActionSummary,
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("writing {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(path)
}

/// Writes every result file of a run into `dir`, creating it if needed
pub fn write_outcome(dir: &Path, outcome: &TriageOutcome<'_>) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let summary = RunSummary {
        run_id: outcome.run_id,
        as_of: outcome.as_of,
        records: outcome.record_count(),
        classified: outcome.classified.len(),
        queued: outcome.queue.len(),
        rejected: outcome.rejects.len(),
        actions: &outcome.summary,
    };

    Ok(vec![
        write_json(dir, CLASSIFIED_FILE, &outcome.classified_rows())?,
        write_json(dir, QUEUE_FILE, &outcome.queue_rows())?,
        write_json(dir, REJECTS_FILE, &outcome.rejects)?,
        write_json(dir, ROLLUP_FILE, &outcome.rollup)?,
        write_json(dir, SUMMARY_FILE, &summary)?,
    ])
}
