use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("recipe must be a JSON object")]
    NotAnObject,

    #[error("No recipe data provided")]
    EmptyDocument,

    #[error("invalid recipe id: {0:?}")]
    InvalidId(String),

    #[error("Invalid version format: {0}")]
    InvalidVersion(String),
}
