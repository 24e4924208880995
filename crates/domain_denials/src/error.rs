//! Denial triage errors
//!
//! [`TriageError`] aborts a run; it is raised for configuration problems
//! before any record is processed. [`RejectReason`] is per record: the
//! record is set aside on the reject list and the batch continues.

use serde::Serialize;
use thiserror::Error;

use core_kernel::{ClaimId, Currency, MoneyError, PayerId, TemporalError};
use domain_catalog::CatalogError;

/// Fatal errors for a triage run
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl TriageError {
    pub fn configuration(message: impl Into<String>) -> Self {
        TriageError::Configuration(message.into())
    }

    /// True for errors that invalidate the whole run configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, TriageError::Configuration(_) | TriageError::Catalog(_))
    }
}

/// Why a single record was set aside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    #[error("claim line status is '{status}', not denied")]
    NotDenied { status: String },

    #[error("balance is in {currency}, the run is valued in {expected}")]
    CurrencyMismatch { currency: Currency, expected: Currency },

    #[error("no payer rule for payer {payer_id}")]
    MissingPayerRule { payer_id: PayerId },

    #[error("appeal deadline passed {days_past} days ago")]
    OutsideFilingWindow { days_past: i64 },

    #[error("denial date cannot be scored: {detail}")]
    InvalidDenialDate { detail: String },
}

impl RejectReason {
    /// Stable reason code for reporting
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::NotDenied { .. } => "NOT_DENIED",
            RejectReason::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            RejectReason::MissingPayerRule { .. } => "MISSING_PAYER_RULE",
            RejectReason::OutsideFilingWindow { .. } => "OUTSIDE_FILING_WINDOW",
            RejectReason::InvalidDenialDate { .. } => "INVALID_DENIAL_DATE",
        }
    }
}

/// A record that could not be triaged, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedDenial {
    pub claim_id: ClaimId,
    pub payer_id: PayerId,
    pub reason: RejectReason,
}
