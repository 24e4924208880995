//! Catalog errors
//!
//! Every variant is a configuration problem: a run must not start against a
//! catalog that fails validation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate {catalog} key: {key}")]
    DuplicateKey { catalog: &'static str, key: String },

    #[error("Invalid payer rule for {payer_id}: {reason}")]
    InvalidPayerRule { payer_id: String, reason: String },

    #[error("Invalid taxonomy entry {code}: {reason}")]
    InvalidTaxonomyEntry { code: String, reason: String },

    #[error("Invalid procedure profile {code}: {reason}")]
    InvalidProcedureProfile { code: String, reason: String },

    #[error("Priority tier must be 1, 2 or 3, got {0}")]
    InvalidPriorityTier(u8),
}
