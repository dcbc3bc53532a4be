//! Observation date type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A calendar date as stored in the dataset.
///
/// The dataset stores dates as zero-padded `YYYY-MM-DD` text, so
/// lexical comparison coincides with chronological order. Inputs are
/// deliberately not validated: a malformed date used as a filter bound
/// simply matches nothing, it never raises an error.
///
/// # Examples
///
/// ```
/// use climate_server::domain::ObsDate;
///
/// let a = ObsDate::new("2016-08-23");
/// let b = ObsDate::new("2017-08-23");
/// assert!(a < b);
/// assert_eq!(a.as_str(), "2016-08-23");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ObsDate(String);

impl ObsDate {
    /// Create a date from any string. No validation is performed.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the date as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObsDate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
