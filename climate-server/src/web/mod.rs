//! Web layer for the climate observation API.
//!
//! Provides the HTTP endpoints over the observation store.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
