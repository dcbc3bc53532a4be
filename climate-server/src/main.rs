use std::net::SocketAddr;

use climate_server::store::ClimateStore;
use climate_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

/// Default path of the SQLite dataset snapshot.
const DEFAULT_DB_PATH: &str = "hawaii.sqlite";

/// Default listen port.
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("climate_server=info,tower_http=info")),
        )
        .init();

    // Optional overrides; everything has a default
    let db_path = std::env::var("CLIMATE_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let host = std::env::var("CLIMATE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("CLIMATE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // Open the dataset (fail fast on a missing file or schema mismatch)
    let store = match ClimateStore::open(&db_path).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open observation database {db_path}: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(store);
    let app = create_router(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("CLIMATE_HOST/CLIMATE_PORT must form a valid socket address");
    println!("Climate observation API listening on http://{addr}");
    println!();
    println!("Available routes:");
    println!("  GET /api/v1.0/precipitation");
    println!("  GET /api/v1.0/stations");
    println!("  GET /api/v1.0/tobs");
    println!("  GET /api/v1.0/start-date/<start>");
    println!("  GET /api/v1.0/start-end-date/<start>/<end>");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
