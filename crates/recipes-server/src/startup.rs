use std::path::PathBuf;
use std::sync::Arc;

use recipes_storage::{BucketStore, LocalStore, SharedStore, client, objects};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ServerConfig, StorageChoice};

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Resolve the storage backend. Runs once; the choice is never re-checked.
pub async fn open_store(config: &ServerConfig) -> eyre::Result<SharedStore> {
    let store: SharedStore = match config.storage {
        StorageChoice::Local => Arc::new(LocalStore::open(&config.local_dir)?),
        StorageChoice::Bucket => Arc::new(open_bucket(config).await?),
        StorageChoice::Auto => {
            if config.emulator_host.is_some() {
                Arc::new(open_bucket(config).await?)
            } else {
                let s3 = client::build_client(config.region.as_deref(), None).await;
                match objects::head_bucket(&s3, &config.bucket).await {
                    Ok(()) => Arc::new(BucketStore::new(s3, &config.bucket)),
                    Err(e) => {
                        tracing::warn!(
                            bucket = %config.bucket,
                            error = %e,
                            "object storage not available, using local storage"
                        );
                        Arc::new(LocalStore::open(&config.local_dir)?)
                    }
                }
            }
        }
    };

    tracing::info!(storage = store.describe(), "storage backend ready");
    Ok(store)
}

async fn open_bucket(config: &ServerConfig) -> eyre::Result<BucketStore> {
    let s3 = client::build_client(
        config.region.as_deref(),
        config.emulator_host.as_deref(),
    )
    .await;

    if let Some(host) = &config.emulator_host {
        tracing::info!(host = %host, "using object storage emulator");
        return Ok(BucketStore::open_or_create(s3, &config.bucket).await?);
    }

    objects::head_bucket(&s3, &config.bucket)
        .await
        .map_err(|e| eyre::eyre!("bucket {} not reachable: {e}", config.bucket))?;
    Ok(BucketStore::new(s3, &config.bucket))
}

/// The frontend bundle directory, if there is one to serve.
pub fn static_dir(config: &ServerConfig) -> Option<PathBuf> {
    if config.static_dir.is_dir() {
        Some(config.static_dir.clone())
    } else {
        tracing::warn!(
            dir = %config.static_dir.display(),
            "static directory not found, frontend will not be served"
        );
        None
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
