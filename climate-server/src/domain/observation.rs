//! Measurement record types.

use super::ObsDate;

/// One weather observation row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Measurement {
    /// Observation date
    pub date: ObsDate,

    /// Identifier of the reporting station
    pub station: String,

    /// Precipitation reading, absent where the station reported none
    pub prcp: Option<f64>,

    /// Temperature observation
    pub tobs: f64,
}

/// The `(date, tobs)` projection served by the observation listing.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Observation {
    /// Observation date
    pub date: ObsDate,

    /// Temperature observation
    pub tobs: f64,
}

/// Null-safe min/avg/max aggregate over temperature observations.
///
/// All three fields are `None` when no rows matched the filter.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct TempStats {
    /// Minimum temperature observation
    pub min: Option<f64>,

    /// Mean temperature observation
    pub avg: Option<f64>,

    /// Maximum temperature observation
    pub max: Option<f64>,
}
