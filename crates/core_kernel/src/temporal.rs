//! Date handling for appeal deadlines
//!
//! - [`AppealWindow`]: a denial date plus the payer's appeal window in days
//! - [`Timezone`]: resolves "today" for a run in the operator's jurisdiction

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper used to pick the as-of date of a run
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Calendar date in this timezone for the given instant
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Calendar date right now in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Appeal deadline overflows the calendar: {date} + {days} days")]
    DateOverflow { date: NaiveDate, days: u32 },
}

/// The appeal window of a single denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealWindow {
    pub denial_date: NaiveDate,
    pub deadline_days: u32,
}

impl AppealWindow {
    pub fn new(denial_date: NaiveDate, deadline_days: u32) -> Self {
        Self {
            denial_date,
            deadline_days,
        }
    }

    /// Last day an appeal can be filed
    pub fn deadline_date(&self) -> Result<NaiveDate, TemporalError> {
        self.denial_date
            .checked_add_days(Days::new(u64::from(self.deadline_days)))
            .ok_or(TemporalError::DateOverflow {
                date: self.denial_date,
                days: self.deadline_days,
            })
    }

    /// Days from `as_of` until the deadline; negative once the deadline has passed
    pub fn days_remaining(&self, as_of: NaiveDate) -> Result<i64, TemporalError> {
        Ok((self.deadline_date()? - as_of).num_days())
    }

    /// Days elapsed since the denial; negative for a denial dated after `as_of`
    pub fn days_since_denial(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.denial_date).num_days()
    }
}
