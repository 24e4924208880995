//! Denial Triage - Batch Binary
//!
//! Turns a file of denied claim lines into a ranked recovery work queue.
//!
//! # Usage
//!
//! ```bash
//! # Use ./triage.toml if present, else defaults and environment
//! denial-triage
//!
//! # Explicit config file
//! denial-triage /etc/triage/triage.toml
//!
//! # Environment overrides
//! TRIAGE_AS_OF=2024-06-03 TRIAGE_ENGINE__TOP_N_FINANCIAL=50 denial-triage
//! ```
//!
//! # Environment Variables
//!
//! * `TRIAGE_INPUTS__RECORDS` - Denied claim lines (default: data/denials.json)
//! * `TRIAGE_OUTPUT_DIR` - Result directory (default: out)
//! * `TRIAGE_AS_OF` - Run date, YYYY-MM-DD (default: today in `TRIAGE_TIMEZONE`)
//! * `TRIAGE_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `TRIAGE_LOG_FORMAT` - pretty or json (default: pretty)
//! * `TRIAGE_ENGINE__*` - Engine tunables, e.g. `TRIAGE_ENGINE__INCLUDE_ACTIONS=ACTIONABLE,REVIEW`

use std::path::PathBuf;

use anyhow::Context;

use interface_batch::{run_batch, telemetry::init_tracing, BatchConfig};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local runs)
    dotenvy::dotenv().ok();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = BatchConfig::load(config_path.as_deref()).context("loading configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        records = %config.inputs.records.display(),
        as_of = %config.as_of(),
        "Starting denial triage"
    );

    let report = run_batch(&config)?;

    tracing::info!(
        run_id = %report.run_id,
        classified = report.classified,
        queued = report.queued,
        rejected = report.rejected,
        "Denial triage complete"
    );
    Ok(())
}
