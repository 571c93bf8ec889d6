use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Settings the frontend needs before it can sign in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub google_client_id: String,
}

pub async fn get_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        google_client_id: state.google_client_id,
    })
}
