use recipes_storage::SharedStore;

use crate::config::ServerConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub project: String,
    pub google_client_id: String,
}

impl AppState {
    pub fn new(store: SharedStore, config: &ServerConfig) -> Self {
        Self {
            store,
            project: config.project.clone(),
            google_client_id: config.google_client_id.clone(),
        }
    }
}
