use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use recipes_core::keys;
use recipes_core::models::document::RecipeDocument;
use tokio::fs;

use crate::error::StorageError;
use crate::store::{RecipeStore, StoredRecipe};

/// Smallest step the modification time is pushed forward by when a rewrite
/// lands within the previous write's clock tick.
const MTIME_STEP: SignedDuration = SignedDuration::from_millis(1);

/// Recipes as `{id}.json` files in a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
    label: String,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        let label = format!("local:{}", dir.display());
        Ok(Self { dir, label })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    async fn modified(&self, path: &Path, key: &str) -> Result<Timestamp, StorageError> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| StorageError::io(path, key, e))?;
        let mtime = meta.modified().map_err(|e| StorageError::io(path, key, e))?;
        Timestamp::try_from(mtime).map_err(|e| StorageError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })
    }

    async fn read(&self, id: &str) -> Result<StoredRecipe, StorageError> {
        let key = keys::recipe(id);
        let path = self.path(&key);

        let version = self.modified(&path, &key).await?;
        let bytes = fs::read(&path)
            .await
            .map_err(|e| StorageError::io(&path, &key, e))?;
        let document = RecipeDocument::from_stored(&bytes)
            .map_err(|source| StorageError::Document { key, source })?;

        Ok(StoredRecipe {
            id: id.to_string(),
            document,
            version,
        })
    }

    /// Atomic replace through a temp file private to this write, so racing
    /// writers never share a half-written file. The temp file is removed if
    /// the rename fails.
    async fn replace(dir: &Path, path: &Path, id: &str, body: Vec<u8>) -> std::io::Result<()> {
        let dir = dir.to_path_buf();
        let path = path.to_path_buf();
        let prefix = format!(".{id}.");
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".tmp")
                .tempfile_in(&dir)?;
            tmp.write_all(&body)?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(std::io::Error::other)?
    }

    /// Push the file's mtime past `previous` so that versions strictly
    /// increase even on coarse clocks.
    fn bump_mtime(path: &Path, previous: Timestamp) -> std::io::Result<Timestamp> {
        let bumped = previous
            .checked_add(MTIME_STEP)
            .map_err(std::io::Error::other)?;
        let file = OpenOptions::new().write(true).open(path)?;
        file.set_modified(SystemTime::from(bumped))?;
        Ok(bumped)
    }
}

#[async_trait]
impl RecipeStore for LocalStore {
    fn describe(&self) -> &str {
        &self.label
    }

    async fn list(&self) -> Result<Vec<StoredRecipe>, StorageError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let mut recipes = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(StorageError::Io {
                        path: self.dir.clone(),
                        source,
                    });
                }
            };

            let name = entry.file_name();
            let Some(id) = name.to_str().and_then(keys::recipe_id) else {
                continue;
            };

            match self.read(id).await {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => tracing::warn!(id, error = %e, "skipping unreadable recipe"),
            }
        }

        recipes.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::debug!(dir = %self.dir.display(), count = recipes.len(), "listed recipes");
        Ok(recipes)
    }

    async fn get(&self, id: &str) -> Result<StoredRecipe, StorageError> {
        self.read(id).await
    }

    async fn put(&self, id: &str, document: &RecipeDocument) -> Result<Timestamp, StorageError> {
        let key = keys::recipe(id);
        let path = self.path(&key);
        let body = document.to_stored().map_err(|source| StorageError::Document {
            key: key.clone(),
            source,
        })?;

        let previous = match self.modified(&path, &key).await {
            Ok(ts) => Some(ts),
            Err(StorageError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        Self::replace(&self.dir, &path, id, body)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        let mut version = self.modified(&path, &key).await?;
        // Strict only for sequential writes; racing writers may bump past a
        // stale `previous`.
        if let Some(previous) = previous
            && version <= previous
        {
            version = Self::bump_mtime(&path, previous).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
        }

        tracing::debug!(id, %version, "recipe written to local disk");
        Ok(version)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let key = keys::recipe(id);
        let path = self.path(&key);
        fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::io(&path, &key, e))?;
        tracing::debug!(id, "recipe deleted from local disk");
        Ok(())
    }
}
