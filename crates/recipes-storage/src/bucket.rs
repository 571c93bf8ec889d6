use async_trait::async_trait;
use aws_sdk_s3::Client;
use jiff::Timestamp;
use recipes_core::keys;
use recipes_core::models::document::RecipeDocument;

use crate::error::StorageError;
use crate::objects;
use crate::store::{RecipeStore, StoredRecipe};

/// Recipes as `{id}.json` objects at the root of an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct BucketStore {
    client: Client,
    bucket: String,
    label: String,
}

impl BucketStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let label = format!("s3://{bucket}");
        Self {
            client,
            bucket,
            label,
        }
    }

    /// Open a bucket on an emulator, creating it on first use.
    pub async fn open_or_create(client: Client, bucket: &str) -> Result<Self, StorageError> {
        if let Err(e) = objects::head_bucket(&client, bucket).await {
            tracing::info!(bucket, error = %e, "bucket not reachable, creating it");
            objects::create_bucket(&client, bucket).await?;
        }
        Ok(Self::new(client, bucket))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn read(&self, id: &str) -> Result<StoredRecipe, StorageError> {
        let key = keys::recipe(id);
        let output = objects::get_object(&self.client, &self.bucket, &key).await?;
        let document = RecipeDocument::from_stored(&output.body)
            .map_err(|source| StorageError::Document {
                key: key.clone(),
                source,
            })?;

        Ok(StoredRecipe {
            id: id.to_string(),
            document,
            version: version_or_now(output.last_modified, &key),
        })
    }
}

/// Some emulators omit `Last-Modified`; treat such objects as just written.
fn version_or_now(last_modified: Option<Timestamp>, key: &str) -> Timestamp {
    last_modified.unwrap_or_else(|| {
        tracing::debug!(key, "object has no last-modified time, using now");
        Timestamp::now()
    })
}

#[async_trait]
impl RecipeStore for BucketStore {
    fn describe(&self) -> &str {
        &self.label
    }

    async fn list(&self) -> Result<Vec<StoredRecipe>, StorageError> {
        let objects = objects::list_objects_with_metadata(&self.client, &self.bucket, "").await?;

        let mut recipes = Vec::new();
        for meta in &objects {
            let Some(id) = keys::recipe_id(&meta.key) else {
                continue;
            };

            match self.read(id).await {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => {
                    tracing::warn!(
                        key = %meta.key,
                        size = meta.size,
                        error = %e,
                        "skipping unreadable recipe"
                    );
                }
            }
        }

        recipes.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::debug!(bucket = %self.bucket, count = recipes.len(), "listed recipes");
        Ok(recipes)
    }

    async fn get(&self, id: &str) -> Result<StoredRecipe, StorageError> {
        self.read(id).await
    }

    async fn put(&self, id: &str, document: &RecipeDocument) -> Result<Timestamp, StorageError> {
        let key = keys::recipe(id);
        let body = document.to_stored().map_err(|source| StorageError::Document {
            key: key.clone(),
            source,
        })?;

        objects::put_object(
            &self.client,
            &self.bucket,
            &key,
            body,
            Some(keys::CONTENT_TYPE),
        )
        .await?;

        // PutObject does not report Last-Modified, so ask for it.
        let meta = objects::head_object(&self.client, &self.bucket, &key).await?;
        let version = version_or_now(meta.last_modified, &key);
        tracing::debug!(bucket = %self.bucket, key = %key, %version, "recipe written to bucket");
        Ok(version)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let key = keys::recipe(id);
        // DeleteObject succeeds for absent keys; check first so callers see NotFound.
        objects::head_object(&self.client, &self.bucket, &key).await?;
        objects::delete_object(&self.client, &self.bucket, &key).await?;
        tracing::debug!(bucket = %self.bucket, key = %key, "recipe deleted from bucket");
        Ok(())
    }
}
