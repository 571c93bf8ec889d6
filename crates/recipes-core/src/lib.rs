//! recipes-core
//!
//! Pure domain types, object key conventions and version timestamps.
//! No storage or HTTP dependency — this is the shared vocabulary of the recipe box.

pub mod error;
pub mod keys;
pub mod models;
pub mod version;
