//! Per-endpoint JSON shapes.
//!
//! Each endpoint declares an explicit mapping from result rows to its
//! response shape, rather than flattening row tuples generically.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::domain::{Measurement, Observation, TempStats};

/// One precipitation reading, serialized as a single-key object
/// `{"<date>": <prcp>}`.
///
/// Rows are not deduplicated by date: two stations reporting on the
/// same day produce two entries with the same key.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationEntry {
    /// Observation date, used as the JSON key
    pub date: String,

    /// Precipitation reading; `null` where the station reported none
    pub prcp: Option<f64>,
}

impl PrecipitationEntry {
    /// Create from a measurement row.
    pub fn from_measurement(m: &Measurement) -> Self {
        Self {
            date: m.date.as_str().to_string(),
            prcp: m.prcp,
        }
    }
}

impl Serialize for PrecipitationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.prcp)?;
        map.end()
    }
}

/// Flatten `(date, tobs)` rows into `[date, tobs, date, tobs, ...]`.
pub fn flatten_observations(rows: &[Observation]) -> Vec<Value> {
    let mut flat = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        flat.push(Value::from(row.date.as_str()));
        flat.push(Value::from(row.tobs));
    }
    flat
}

/// The `[min, avg, max]` triple for the temperature stats endpoints.
///
/// Missing aggregates serialize as `null`, so an empty match yields
/// `[null, null, null]`.
pub fn stats_triple(stats: &TempStats) -> [Option<f64>; 3] {
    [stats.min, stats.avg, stats.max]
}

/// Error response.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
