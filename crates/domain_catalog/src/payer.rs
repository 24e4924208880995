//! Payer-specific appeal rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AppealWindow, Money, PayerId, Rate};
use crate::error::CatalogError;

/// Appeal deadline and historical yield for one payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerRule {
    pub payer_id: PayerId,
    /// Days after the denial date during which an appeal can be filed
    pub appeal_deadline_days: i32,
    /// Share of outstanding balance historically recovered (0.0-1.0)
    pub yield_rate: Rate,
}

impl PayerRule {
    pub fn new(payer_id: impl Into<PayerId>, appeal_deadline_days: i32, yield_rate: Rate) -> Self {
        Self {
            payer_id: payer_id.into(),
            appeal_deadline_days,
            yield_rate,
        }
    }

    /// Rejects yields outside [0,1] and negative deadline windows
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.yield_rate.is_unit_interval() {
            return Err(CatalogError::InvalidPayerRule {
                payer_id: self.payer_id.to_string(),
                reason: format!("yield rate {} outside 0%..=100%", self.yield_rate),
            });
        }
        if self.appeal_deadline_days < 0 {
            return Err(CatalogError::InvalidPayerRule {
                payer_id: self.payer_id.to_string(),
                reason: format!("negative appeal deadline of {} days", self.appeal_deadline_days),
            });
        }
        Ok(())
    }

    /// Expected recoverable amount of an outstanding balance
    pub fn expected_recovery(&self, balance: &Money) -> Result<Money, CatalogError> {
        self.validate()?;
        Ok(self.yield_rate.apply(balance))
    }

    /// The appeal window opened by a denial on `denial_date`
    pub fn appeal_window(&self, denial_date: NaiveDate) -> Result<AppealWindow, CatalogError> {
        let days = u32::try_from(self.appeal_deadline_days).map_err(|_| {
            CatalogError::InvalidPayerRule {
                payer_id: self.payer_id.to_string(),
                reason: format!("negative appeal deadline of {} days", self.appeal_deadline_days),
            }
        })?;
        Ok(AppealWindow::new(denial_date, days))
    }
}
