//! JSON input loading

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::debug;

use domain_catalog::ReferenceCatalogs;
use domain_denials::DenialRecord;
use crate::config::InputPaths;

/// Reads a JSON array of `T` from `path`
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let items: Vec<T> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;

    debug!(path = %path.display(), count = items.len(), "Loaded input file");
    Ok(items)
}

/// Loads and validates the four reference catalogs
pub fn load_catalogs(inputs: &InputPaths) -> anyhow::Result<ReferenceCatalogs> {
    let catalogs = ReferenceCatalogs::from_parts(
        read_json_array(&inputs.taxonomy)?,
        read_json_array(&inputs.remarks)?,
        read_json_array(&inputs.procedures)?,
        read_json_array(&inputs.payers)?,
    )
    .context("invalid reference catalogs")?;
    Ok(catalogs)
}

pub fn load_records(path: &Path) -> anyhow::Result<Vec<DenialRecord>> {
    read_json_array(path)
}
