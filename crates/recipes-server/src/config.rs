use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which storage backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageChoice {
    /// Use the bucket when it is reachable at startup, local disk otherwise.
    Auto,
    Local,
    Bucket,
}

impl FromStr for StorageChoice {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(StorageChoice::Auto),
            "local" => Ok(StorageChoice::Local),
            "bucket" | "s3" => Ok(StorageChoice::Bucket),
            other => Err(eyre::eyre!(
                "unknown RECIPES_STORAGE {other:?} (expected auto, local or bucket)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(eyre::eyre!("unknown RECIPES_LOG_FORMAT {other:?}")),
        }
    }
}

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub storage: StorageChoice,
    pub local_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bucket: String,
    pub project: String,
    pub region: Option<String>,
    /// Object store emulator endpoint. When set, the bucket backend talks to
    /// it and creates the bucket if needed.
    pub emulator_host: Option<String>,
    pub google_client_id: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let bind = or("RECIPES_BIND", "127.0.0.1:8080");
        let bind = bind
            .parse()
            .map_err(|e| eyre::eyre!("invalid RECIPES_BIND {bind:?}: {e}"))?;

        Ok(Self {
            bind,
            storage: or("RECIPES_STORAGE", "auto").parse()?,
            local_dir: PathBuf::from(or("RECIPES_LOCAL_DIR", "local_storage")),
            static_dir: PathBuf::from(or("RECIPES_STATIC_DIR", "www")),
            bucket: or("BUCKET_NAME", "recipes-storage-bucket"),
            project: or("RECIPES_PROJECT", "recipes"),
            region: var("AWS_REGION"),
            emulator_host: var("STORAGE_EMULATOR_HOST"),
            google_client_id: lookup("GOOGLE_CLIENT_ID").unwrap_or_default(),
            log_format: or("RECIPES_LOG_FORMAT", "text").parse()?,
        })
    }
}
