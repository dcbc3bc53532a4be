//! Test fixtures: throwaway observation databases.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

use super::ClimateStore;

/// A fixture measurement row: (station, date, prcp, tobs).
pub(crate) type Row = (&'static str, &'static str, Option<f64>, f64);

/// Create a dataset file under `dir` holding `rows` and open a store
/// over it.
pub(crate) async fn store_with_rows(dir: &TempDir, rows: &[Row]) -> ClimateStore {
    let path = dir.path().join("climate.sqlite");
    create_dataset(&path, rows).await;
    ClimateStore::open(&path).await.expect("fixture store opens")
}

/// Write a dataset with the canonical schema and the given rows.
pub(crate) async fn create_dataset(path: &Path, rows: &[Row]) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&pool)
    .await
    .unwrap();

    for &(station, date, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;
}
