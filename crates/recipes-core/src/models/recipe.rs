use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed view of a stored recipe.
///
/// Every field is optional on the wire so that anything the extractor or a
/// client produced still loads. Fields this type does not know about are kept
/// in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub steps: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<Servings>,
    pub attributes: String,
    /// Derived on read. Dropped again before anything is written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<jiff::Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    pub amount: String,
    pub unit: String,
    pub name: String,
}

/// Yield of a recipe, e.g. `4 portioner`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Servings {
    pub amount: String,
    pub unit: String,
}

impl Servings {
    /// The extractor writes `{}` when a page has no yield.
    pub fn is_empty(&self) -> bool {
        self.amount.is_empty() && self.unit.is_empty()
    }
}
