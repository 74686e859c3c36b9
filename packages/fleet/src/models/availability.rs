//! # Availability model — statuses, calendar dates and ledger keys
//!
//! An availability entry is one driver's status on one local calendar date.
//! In memory the ledger is keyed by the structured [`AvailabilityKey`]; only at
//! the persistence boundary is the key flattened to the string form
//! `"{driver_id}_{YYYY-MM-DD}"`.
//!
//! ## Storage key decoding
//!
//! [`AvailabilityKey::from_storage_key`] splits on the **last** [`KEY_SEPARATOR`].
//! An ISO date never contains `_`, so every driver id, including ids that
//! contain the separator themselves, decodes back to the exact pair it was
//! encoded from.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between driver id and date in persisted keys.
pub const KEY_SEPARATOR: char = '_';

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date string that is not a valid `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid calendar date `{0}`, expected YYYY-MM-DD")]
pub struct DateError(pub String);

/// Parse an ISO `YYYY-MM-DD` local calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    if s.len() != 10 {
        return Err(DateError(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateError(s.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

/// Identity of one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AvailabilityKey {
    pub driver_id: String,
    pub date: NaiveDate,
}

impl AvailabilityKey {
    pub fn new(driver_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            driver_id: driver_id.into(),
            date,
        }
    }

    /// Flatten to the persisted `"{driver_id}_{date}"` form.
    pub fn to_storage_key(&self) -> String {
        format!(
            "{}{}{}",
            self.driver_id,
            KEY_SEPARATOR,
            self.date.format(DATE_FORMAT)
        )
    }

    /// Inverse of [`to_storage_key`](Self::to_storage_key). Returns `None` when
    /// there is no separator or the date part is not a valid date.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        let (driver_id, date) = key.rsplit_once(KEY_SEPARATOR)?;
        let date = parse_date(date).ok()?;
        Some(Self::new(driver_id, date))
    }
}
