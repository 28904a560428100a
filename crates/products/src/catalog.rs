//! Collection-level catalog rules.
//!
//! These functions operate on the whole in-memory product collection because
//! the rules they enforce (code uniqueness, id assignment) span products.

use storefront_core::{DomainError, DomainResult, ProductId, entity};

use crate::product::{NewProduct, Product, ProductPatch};

pub fn not_found(id: ProductId) -> DomainError {
    DomainError::not_found(format!("Product with id {id} not found."))
}

/// Reject a code already used by another product in `products`.
pub fn ensure_code_unique(products: &[Product], code: &str) -> DomainResult<()> {
    if products.iter().any(|p| p.code() == code) {
        return Err(DomainError::validation("Product code already exists."));
    }
    Ok(())
}

/// Validate `new` against the collection and build the product to append.
///
/// The product is not inserted; the caller appends and persists it.
pub fn create_product(products: &[Product], new: NewProduct) -> DomainResult<Product> {
    let valid = new.validate()?;
    ensure_code_unique(products, valid.code())?;
    let id = entity::next_id(products, ProductId::new(1), ProductId::next);
    Ok(Product::from_new(id, valid))
}

/// Apply `patch` to the product with `id` in place and return the new value.
///
/// On error the collection is left untouched.
pub fn update_product(
    products: &mut [Product],
    id: ProductId,
    patch: ProductPatch,
) -> DomainResult<Product> {
    let current = entity::find_mut(products, id).ok_or_else(|| not_found(id))?;
    let next = current.patched(patch)?;
    *current = next.clone();
    Ok(next)
}

/// First `limit` products in insertion order.
pub fn take_limited(products: Vec<Product>, limit: Option<usize>) -> Vec<Product> {
    match limit {
        Some(limit) => products.into_iter().take(limit).collect(),
        None => products,
    }
}
