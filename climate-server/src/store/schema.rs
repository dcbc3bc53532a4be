//! Static schema declaration and startup validation.
//!
//! The dataset ships as a fixed SQLite snapshot. Rather than
//! reflecting its schema at runtime, the tables and columns this
//! service reads are declared here and checked once against
//! `PRAGMA table_info` output when the store opens.

use sqlx::{Row, SqlitePool};

use super::error::StoreError;

/// A table the service expects to find, with the columns it relies on.
struct ExpectedTable {
    name: &'static str,
    columns: &'static [&'static str],
}

/// The dataset contract. `station` is never queried by the handlers
/// but belongs to the snapshot, so its shape is checked too.
const EXPECTED: &[ExpectedTable] = &[
    ExpectedTable {
        name: "measurement",
        columns: &["station", "date", "prcp", "tobs"],
    },
    ExpectedTable {
        name: "station",
        columns: &["station", "name", "latitude", "longitude", "elevation"],
    },
];

/// Check every expected table and column against the live database.
pub(super) async fn validate(pool: &SqlitePool) -> Result<(), StoreError> {
    for table in EXPECTED {
        // PRAGMA cannot take bound parameters; names are static consts.
        let query = format!("PRAGMA table_info({})", table.name);
        let rows = sqlx::query(&query).fetch_all(pool).await?;

        // An unknown table yields an empty result rather than an error.
        if rows.is_empty() {
            return Err(StoreError::MissingTable { table: table.name });
        }

        let mut present = Vec::with_capacity(rows.len());
        for row in &rows {
            present.push(row.try_get::<String, _>("name")?);
        }

        for &column in table.columns {
            if !present.iter().any(|c| c == column) {
                return Err(StoreError::MissingColumn {
                    table: table.name,
                    column,
                });
            }
        }
    }

    Ok(())
}
