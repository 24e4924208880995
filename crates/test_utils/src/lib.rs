//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! denial triage test suite.
//!
//! # Modules
//!
//! - `fixtures`: A standard set of reference catalogs and dates
//! - `builders`: Builder patterns for records and catalog entries
//! - `assertions`: Ordering and admission checks for triage output
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
