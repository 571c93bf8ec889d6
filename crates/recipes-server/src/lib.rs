//! recipes-server
//!
//! HTTP front for the recipe store: a small JSON API plus the static
//! frontend bundle.

use std::path::Path;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod state;

pub use state::AppState;

/// JSON API routes, without state attached.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/config", get(routes::config::get_config))
        .route(
            "/recipes",
            get(routes::recipes::list_recipes).post(routes::recipes::create_recipe),
        )
        .route(
            "/recipes/{id}",
            get(routes::recipes::get_recipe)
                .put(routes::recipes::update_recipe)
                .delete(routes::recipes::delete_recipe),
        )
}

/// The full application: the API at the root and under `/api` (where the
/// frontend calls it), with everything else served from `static_dir`.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = api_router();
    let mut app = api.clone().nest("/api", api);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(axum_mw::from_fn(middleware::request_log::log_request))
        .layer(cors)
        .with_state(state)
}
