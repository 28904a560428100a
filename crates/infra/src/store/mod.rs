//! Whole-collection persistence.
//!
//! Each collection (products, carts) is one JSON array document that is read
//! and rewritten in full on every mutation.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use r#trait::{CollectionStore, LoadOutcome, StoreError};
