//! Read queries over the observation database.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::domain::{Measurement, ObsDate, Observation, TempStats};

use super::error::StoreError;
use super::schema;

/// Pool size. All access is read-only, so contention stays low.
const MAX_CONNECTIONS: u32 = 5;

/// Handle to the pre-populated observation database.
///
/// Cheap to clone; clones share the same connection pool. The pool is
/// opened once at startup and lives for the rest of the process.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the database at `path` read-only and check its schema.
    ///
    /// Fails if the file does not exist or the expected tables and
    /// columns are missing. Callers treat any error here as fatal.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        schema::validate(&pool).await?;
        debug!(path = %path.as_ref().display(), "opened observation database");

        Ok(Self { pool })
    }

    /// Every measurement row, materialized in storage order.
    ///
    /// The intended dataset is small enough that returning the full
    /// result set is fine; there is no pagination.
    pub async fn all_measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT date, station, prcp, tobs FROM measurement",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Distinct identifiers of stations that have reported measurements.
    pub async fn stations(&self) -> Result<Vec<String>, StoreError> {
        let stations =
            sqlx::query_scalar::<_, String>("SELECT station FROM measurement GROUP BY station")
                .fetch_all(&self.pool)
                .await?;
        Ok(stations)
    }

    /// `(date, tobs)` rows with `start <= date <= end`, bounds inclusive.
    ///
    /// Bounds are compared as text against the stored date strings.
    pub async fn observations_between(
        &self,
        start: &ObsDate,
        end: &ObsDate,
    ) -> Result<Vec<Observation>, StoreError> {
        let rows = sqlx::query_as::<_, Observation>(
            "SELECT date, tobs FROM measurement WHERE date >= ?1 AND date <= ?2",
        )
        .bind(start.as_str())
        .bind(end.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Min/avg/max of `tobs` over rows with `date >= start`, bounded
    /// above by `end` when one is given.
    ///
    /// Aggregating an empty match yields all-`None` stats, not an error.
    pub async fn temperature_stats(
        &self,
        start: &ObsDate,
        end: Option<&ObsDate>,
    ) -> Result<TempStats, StoreError> {
        let stats = match end {
            Some(end) => {
                sqlx::query_as::<_, TempStats>(
                    "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max \
                     FROM measurement WHERE date >= ?1 AND date <= ?2",
                )
                .bind(start.as_str())
                .bind(end.as_str())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TempStats>(
                    "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max \
                     FROM measurement WHERE date >= ?1",
                )
                .bind(start.as_str())
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(stats)
    }
}
