pub mod document;
pub mod recipe;
