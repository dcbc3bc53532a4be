//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::ObsDate;
use crate::store::StoreError;

use super::dto::{ErrorResponse, PrecipitationEntry, flatten_observations, stats_triple};
use super::state::AppState;

/// End of the fixed observation window served by `/api/v1.0/tobs`.
///
/// The dataset is a static snapshot whose last observation falls on
/// this date. The window is anchored here, not at "today": deriving it
/// from the clock would silently empty the endpoint.
const OBSERVATION_WINDOW_END: &str = "2017-08-23";

/// Length of the observation window in days.
const OBSERVATION_WINDOW_DAYS: i64 = 365;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/start-date/:start", get(stats_from))
        .route("/api/v1.0/start-end-date/:start/:end", get(stats_between))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// List the available routes.
async fn index() -> &'static str {
    "Available Routes:\n\
     /api/v1.0/precipitation\n\
     /api/v1.0/stations\n\
     /api/v1.0/tobs\n\
     /api/v1.0/start-date/<start>\n\
     /api/v1.0/start-end-date/<start>/<end>\n"
}

/// All precipitation readings, one `{date: prcp}` object per row.
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationEntry>>, AppError> {
    let measurements = state.store.all_measurements().await?;
    let entries = measurements
        .iter()
        .map(PrecipitationEntry::from_measurement)
        .collect();
    Ok(Json(entries))
}

/// Distinct station identifiers.
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let stations = state.store.stations().await?;
    Ok(Json(stations))
}

/// Temperature observations for the fixed prior-year window, as a
/// flattened `[date, tobs, date, tobs, ...]` array.
async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    let (start, end) = observation_window();
    let rows = state.store.observations_between(&start, &end).await?;
    Ok(Json(flatten_observations(&rows)))
}

/// Min/avg/max temperature for dates on or after `start`.
///
/// `start` is taken verbatim and compared lexically against stored
/// dates; a malformed value matches nothing rather than erroring.
async fn stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<[Option<f64>; 3]>, AppError> {
    let start = ObsDate::new(start);
    let stats = state.store.temperature_stats(&start, None).await?;
    Ok(Json(stats_triple(&stats)))
}

/// Min/avg/max temperature for dates between `start` and `end`,
/// bounds inclusive.
async fn stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<[Option<f64>; 3]>, AppError> {
    let start = ObsDate::new(start);
    let end = ObsDate::new(end);
    let stats = state.store.temperature_stats(&start, Some(&end)).await?;
    Ok(Json(stats_triple(&stats)))
}

/// The fixed `/tobs` window as inclusive date bounds.
fn observation_window() -> (ObsDate, ObsDate) {
    let end = NaiveDate::parse_from_str(OBSERVATION_WINDOW_END, "%Y-%m-%d")
        .expect("window end constant is a valid date");
    let start = end - Duration::days(OBSERVATION_WINDOW_DAYS);
    (
        ObsDate::new(start.format("%Y-%m-%d").to_string()),
        ObsDate::new(OBSERVATION_WINDOW_END),
    )
}

/// Application error type.
///
/// Every data-access failure surfaces as a plain 500; the permissive
/// path parameters mean there is no 4xx to hand out.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let AppError::Internal { message } = self;
        error!("request failed: {message}");

        let body = Json(ErrorResponse { error: message });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const SCENARIO_ROWS: &[fixtures::Row] = &[
        ("USC00519397", "2017-01-01", Some(0.0), 60.0),
        ("USC00519397", "2017-06-01", Some(0.1), 80.0),
    ];

    /// Build a router over a fixture dataset. The TempDir must stay
    /// alive for as long as the router is used.
    async fn test_router(rows: &[fixtures::Row]) -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let store = fixtures::store_with_rows(&dir, rows).await;
        let router = create_router(AppState::new(store));
        (dir, router)
    }

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn index_lists_routes() {
        let (_dir, router) = test_router(&[]).await;
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("/api/v1.0/precipitation"));
        assert!(text.contains("/api/v1.0/start-end-date/<start>/<end>"));
    }

    #[tokio::test]
    async fn precipitation_returns_one_entry_per_row() {
        // Two rows on the same date from different stations: not
        // deduplicated, one entry each.
        let (_dir, router) = test_router(&[
            ("USC00519397", "2017-01-01", Some(0.08), 65.0),
            ("USC00513117", "2017-01-01", None, 63.0),
            ("USC00519397", "2017-01-02", Some(0.0), 66.0),
        ])
        .await;

        let (status, value) = get_json(&router, "/api/v1.0/precipitation").await;
        assert_eq!(status, StatusCode::OK);

        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], serde_json::json!({"2017-01-01": 0.08}));
        assert_eq!(entries[1], serde_json::json!({"2017-01-01": null}));
        assert_eq!(entries[2], serde_json::json!({"2017-01-02": 0.0}));
    }

    #[tokio::test]
    async fn stations_returns_distinct_identifiers() {
        let (_dir, router) = test_router(&[
            ("USC00519397", "2017-01-01", None, 65.0),
            ("USC00519397", "2017-01-02", None, 66.0),
            ("USC00513117", "2017-01-01", None, 63.0),
        ])
        .await;

        let (status, value) = get_json(&router, "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);

        let mut stations: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        stations.sort();
        assert_eq!(stations, vec!["USC00513117", "USC00519397"]);
    }

    #[tokio::test]
    async fn tobs_stays_within_fixed_window() {
        let (_dir, router) = test_router(&[
            ("USC00519397", "2016-08-22", None, 70.0), // before window
            ("USC00519397", "2016-08-23", None, 71.0), // window start
            ("USC00519397", "2017-03-01", None, 72.0),
            ("USC00519397", "2017-08-23", None, 73.0), // window end
            ("USC00519397", "2018-01-01", None, 74.0), // after window
        ])
        .await;

        let (status, value) = get_json(&router, "/api/v1.0/tobs").await;
        assert_eq!(status, StatusCode::OK);

        let flat = value.as_array().unwrap();
        // Flattened pairs: even length, dates at even indices.
        assert_eq!(flat.len() % 2, 0);
        let dates: Vec<&str> = flat
            .iter()
            .step_by(2)
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2016-08-23", "2017-03-01", "2017-08-23"]);

        for date in dates {
            assert!(date >= "2016-08-23" && date <= "2017-08-23");
        }
    }

    #[tokio::test]
    async fn start_date_aggregates_matching_rows() {
        let (_dir, router) = test_router(SCENARIO_ROWS).await;

        let (status, value) = get_json(&router, "/api/v1.0/start-date/2017-03-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, serde_json::json!([80.0, 80.0, 80.0]));
    }

    #[tokio::test]
    async fn start_end_date_aggregates_range() {
        let (_dir, router) = test_router(SCENARIO_ROWS).await;

        let (status, value) =
            get_json(&router, "/api/v1.0/start-end-date/2017-01-01/2017-12-31").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, serde_json::json!([60.0, 70.0, 80.0]));
    }

    #[tokio::test]
    async fn malformed_start_yields_nulls_not_an_error() {
        let (_dir, router) = test_router(SCENARIO_ROWS).await;

        let (status, value) = get_json(&router, "/api/v1.0/start-date/not-a-date").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, serde_json::json!([null, null, null]));
    }

    #[tokio::test]
    async fn start_before_all_rows_covers_everything() {
        let (_dir, router) = test_router(SCENARIO_ROWS).await;

        let (status, value) = get_json(&router, "/api/v1.0/start-date/2000-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, serde_json::json!([60.0, 70.0, 80.0]));
    }

    #[test]
    fn window_start_is_365_days_before_end() {
        let (start, end) = observation_window();
        assert_eq!(start.as_str(), "2016-08-23");
        assert_eq!(end.as_str(), "2017-08-23");
    }
}
