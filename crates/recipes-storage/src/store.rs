use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use recipes_core::models::document::RecipeDocument;
use serde_json::Value;

use crate::error::StorageError;

/// A recipe as read back from storage.
#[derive(Debug, Clone)]
pub struct StoredRecipe {
    pub id: String,
    pub document: RecipeDocument,
    pub version: Timestamp,
}

impl StoredRecipe {
    /// The JSON served to clients: the stored document with `version` attached.
    pub fn into_served(self) -> Value {
        self.document.with_version(self.version)
    }
}

/// Persistence for recipe documents.
///
/// Every call goes straight to the backing medium. Nothing is cached and
/// nothing is locked, so concurrent writers to one id race and the last one
/// to land wins. Ids passed in must already satisfy
/// [`recipes_core::keys::is_valid_id`].
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Where the recipes live, for logs.
    fn describe(&self) -> &str;

    /// All readable recipes, sorted by id. Objects that cannot be read or
    /// parsed are logged and left out.
    async fn list(&self) -> Result<Vec<StoredRecipe>, StorageError>;

    async fn get(&self, id: &str) -> Result<StoredRecipe, StorageError>;

    /// Create or overwrite a recipe. Returns the new version.
    async fn put(&self, id: &str, document: &RecipeDocument) -> Result<Timestamp, StorageError>;

    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Process-wide store handle, chosen once at startup.
pub type SharedStore = Arc<dyn RecipeStore>;
