//! Core Kernel - Foundational types for the denial triage system
//!
//! This crate provides the building blocks shared by the catalog and engine crates:
//! - Money and rate types with precise decimal arithmetic
//! - Normalized reference codes (claim, payer, procedure, denial, remark)
//! - Appeal-window date arithmetic and timezone-aware "today"

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{AppealWindow, TemporalError, Timezone};
pub use identifiers::{
    RunId, ClaimId, PayerId, ProcedureCode, DenialCode, RemarkCode,
};
