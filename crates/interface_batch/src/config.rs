//! Batch configuration

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::Timezone;
use domain_denials::TriageConfig;

/// Prefix of environment overrides, e.g. `TRIAGE_OUTPUT_DIR`
pub const ENV_PREFIX: &str = "TRIAGE";

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "triage";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Locations of the JSON inputs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    pub taxonomy: PathBuf,
    pub remarks: PathBuf,
    pub procedures: PathBuf,
    pub payers: PathBuf,
    pub records: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            taxonomy: PathBuf::from("data/taxonomy.json"),
            remarks: PathBuf::from("data/remarks.json"),
            procedures: PathBuf::from("data/procedures.json"),
            payers: PathBuf::from("data/payers.json"),
            records: PathBuf::from("data/denials.json"),
        }
    }
}

/// Batch configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub inputs: InputPaths,
    /// Directory the result files are written to
    pub output_dir: PathBuf,
    /// Fixed as-of date; today in `timezone` when unset
    pub as_of: Option<NaiveDate>,
    pub timezone: Timezone,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    pub engine: TriageConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            inputs: InputPaths::default(),
            output_dir: PathBuf::from("out"),
            as_of: None,
            timezone: Timezone::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            engine: TriageConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Loads configuration from an optional file and `TRIAGE_` environment variables
    ///
    /// Without an explicit path, `triage.toml` (or `.json`, `.yaml`) in the
    /// working directory is used if present. Nested keys use a double
    /// underscore: `TRIAGE_ENGINE__TOP_N_FINANCIAL=50`. List values are
    /// comma separated.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("engine.include_actions")
                    .with_list_parse_key("engine.hard_excluded_codes"),
            )
            .build()?
            .try_deserialize()
    }

    /// The run date
    pub fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| self.timezone.today())
    }
}
