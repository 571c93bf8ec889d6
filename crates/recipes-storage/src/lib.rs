//! recipes-storage
//!
//! Recipe persistence. One trait, two backends: a directory on local disk and
//! an S3-compatible bucket. Both store one `{id}.json` object per recipe and
//! derive the version from the object's last-modified time.

pub mod bucket;
pub mod client;
pub mod error;
pub mod local;
pub mod objects;
pub mod store;

pub use bucket::BucketStore;
pub use local::LocalStore;
pub use store::{RecipeStore, SharedStore, StoredRecipe};
