use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use jiff::Timestamp;
use recipes_core::keys;
use recipes_core::models::document::RecipeDocument;
use recipes_core::version;
use recipes_storage::StoredRecipe;
use recipes_storage::error::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Only return recipes changed strictly after this version.
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub message: &'static str,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
}

pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let cutoff = params
        .version
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(version::parse)
        .transpose()?;

    let recipes = state
        .store
        .list()
        .await?
        .into_iter()
        .filter(|r| version::is_newer(r.version, cutoff))
        .map(StoredRecipe::into_served)
        .collect();

    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = keys::validate_id(&id)?;
    let recipe = state.store.get(id).await?;
    Ok(Json(recipe.into_served()))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let mut document = RecipeDocument::from_body(&body)?;
    let id = keys::new_id();
    document.strip_version();
    document.set_id(&id);

    let written = state.store.put(&id, &document).await?;
    tracing::info!(
        id = %id,
        title = document.title().unwrap_or_default(),
        version = %written,
        "recipe created"
    );

    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Updated>, ApiError> {
    let id = keys::validate_id(&id)?;
    let mut document = RecipeDocument::from_body(&body)?;
    let expected = if_match(&headers)?;

    // A stored object that no longer parses still exists and may be replaced,
    // but it has no version to compare against.
    let current = match state.store.get(id).await {
        Ok(recipe) => Some(recipe.version),
        Err(StorageError::Document { key, source }) => {
            tracing::warn!(key = %key, error = %source, "overwriting unreadable recipe");
            None
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(expected) = expected
        && current != Some(expected)
    {
        return Err(ApiError::PreconditionFailed(format!(
            "Recipe was modified (current version {})",
            current.map(version::format).unwrap_or_default()
        )));
    }

    document.strip_version();
    document.set_id(id);
    let written = state.store.put(id, &document).await?;
    tracing::info!(id, version = %written, "recipe updated");

    Ok(Json(Updated {
        message: "Recipe updated successfully",
        version: version::format(written),
    }))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let id = keys::validate_id(&id)?;
    state.store.delete(id).await?;
    tracing::info!(id, "recipe deleted");
    Ok(Json(Deleted {
        message: "Recipe deleted successfully",
    }))
}

/// Version the client expects to overwrite, from `If-Match`.
///
/// Absent or `*` means no check. Values may be quoted like entity tags.
fn if_match(headers: &HeaderMap) -> Result<Option<Timestamp>, ApiError> {
    let Some(value) = headers.get(header::IF_MATCH) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| ApiError::BadRequest("If-Match must be a version timestamp".to_string()))?
        .trim()
        .trim_matches('"');

    if raw == "*" {
        return Ok(None);
    }
    Ok(Some(version::parse(raw)?))
}
