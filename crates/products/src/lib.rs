//! Products domain module.
//!
//! This crate contains business rules for the catalog (field validation, code
//! uniqueness, code immutability, stock accounting), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod product;

pub use catalog::{create_product, ensure_code_unique, take_limited, update_product};
pub use product::{NewProduct, Product, ProductPatch};
