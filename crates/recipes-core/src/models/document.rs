use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::models::recipe::Recipe;
use crate::version;

/// A recipe as stored: an arbitrary JSON object keyed by its `id` field.
///
/// Documents are deliberately schemaless. The only structure the store relies
/// on is that the top level is an object, so `id` can be set and `version`
/// attached on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeDocument(Map<String, Value>);

impl RecipeDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a request body. Empty bodies, `null` and `{}` carry no recipe.
    pub fn from_body(body: &[u8]) -> Result<Self, CoreError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(CoreError::EmptyDocument);
        }
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(CoreError::EmptyDocument),
            Value::Object(fields) if fields.is_empty() => Err(CoreError::EmptyDocument),
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(CoreError::NotAnObject),
        }
    }

    /// Parse a stored object.
    pub fn from_stored(bytes: &[u8]) -> Result<Self, CoreError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(CoreError::NotAnObject),
        }
    }

    /// Serialize for storage: two-space indentation, non-ASCII kept as is.
    pub fn to_stored(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec_pretty(&self.0)?)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn set_id(&mut self, id: &str) {
        self.0.insert("id".to_string(), Value::String(id.to_string()));
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Remove the derived `version` field a client may have echoed back.
    pub fn strip_version(&mut self) {
        self.0.remove(version::FIELD);
    }

    /// The document as served: stored fields plus the derived version.
    pub fn with_version(mut self, version: Timestamp) -> Value {
        self.0.insert(
            version::FIELD.to_string(),
            Value::String(version::format(version)),
        );
        Value::Object(self.0)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Typed view of the document.
    pub fn to_recipe(&self) -> Result<Recipe, CoreError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }
}

impl TryFrom<&Recipe> for RecipeDocument {
    type Error = CoreError;

    fn try_from(recipe: &Recipe) -> Result<Self, Self::Error> {
        match serde_json::to_value(recipe)? {
            Value::Object(fields) => {
                let mut doc = Self(fields);
                doc.strip_version();
                Ok(doc)
            }
            _ => Err(CoreError::NotAnObject),
        }
    }
}
