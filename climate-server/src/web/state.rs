//! Application state for the web layer.

use std::sync::Arc;

use crate::store::ClimateStore;

/// Shared application state.
///
/// Holds the store handle that every request handler queries.
#[derive(Clone)]
pub struct AppState {
    /// Pooled observation database handle
    pub store: Arc<ClimateStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: ClimateStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
