//! Reference Catalogs
//!
//! Read-only knowledge bases joined against denied claim lines:
//!
//! - [`DenialTaxonomyEntry`]: adjustment reason code -> denial kind, category,
//!   routing, historical recovery rate, rework cost and priority tier
//! - [`RemarkEntry`]: remark code glossary (advisory)
//! - [`ProcedureRiskProfile`]: per-procedure denial intelligence (advisory)
//! - [`PayerRule`]: appeal window and historical yield per payer
//!
//! Catalogs are validated once when assembled into [`ReferenceCatalogs`] and
//! never mutated afterwards, so a single instance can be shared across
//! worker threads for the lifetime of a run.

pub mod taxonomy;
pub mod remark;
pub mod procedure;
pub mod payer;
pub mod catalog;
pub mod error;

pub use taxonomy::{AdjustmentGroup, DenialKind, DenialTaxonomyEntry, PriorityTier};
pub use remark::{RemarkClass, RemarkEntry};
pub use procedure::{ProcedureRiskProfile, RiskLevel};
pub use payer::PayerRule;
pub use catalog::{CatalogStats, ReferenceCatalogs};
pub use error::CatalogError;
