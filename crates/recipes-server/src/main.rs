use recipes_server::config::ServerConfig;
use recipes_server::{AppState, build_router, startup};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServerConfig::from_env()?;
    startup::init_tracing(config.log_format);
    tracing::info!(project = %config.project, "starting recipe server");

    let store = startup::open_store(&config).await?;
    let state = AppState::new(store, &config);
    let static_dir = startup::static_dir(&config);
    let app = build_router(state, static_dir.as_deref());

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
