//! Cart/inventory reconciliation.
//!
//! Every unit of a product is either available (`Product::stock`) or reserved
//! by exactly one cart line. `add_units` moves units from stock into a cart,
//! `remove_units` moves them back.
//!
//! Both operations check all of their preconditions before touching either
//! collection, and the first failing check is the only one reported. On error
//! the collections are exactly as they were passed in, so callers can skip
//! persistence entirely.

use storefront_core::{CartId, DomainError, DomainResult, ProductId, entity};
use storefront_products::{Product, catalog};

use crate::cart::{self, Cart, CartLine, Units};

/// Outcome of a successful `remove_units`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub cart_id: CartId,
    pub product_id: ProductId,
    /// Units still held by the line; zero means the line was dropped.
    pub remaining_units: u64,
}

impl Removal {
    pub fn line_removed(&self) -> bool {
        self.remaining_units == 0
    }

    pub fn message(&self) -> String {
        format!(
            "Product with id {} removed from cart {}.",
            self.product_id, self.cart_id
        )
    }
}

/// Reserve `units` of `product_id` in cart `cart_id`.
///
/// Checks, in order: the cart exists, the product exists, and the product has
/// `units` available. Only the delta is taken from stock, so a line can never
/// grow past what it held plus what was available.
pub fn add_units(
    carts: &mut [Cart],
    products: &mut [Product],
    cart_id: CartId,
    product_id: ProductId,
    units: Units,
) -> DomainResult<Cart> {
    let cart = entity::find_mut(carts, cart_id).ok_or_else(|| cart::not_found(cart_id))?;
    let product =
        entity::find_mut(products, product_id).ok_or_else(|| catalog::not_found(product_id))?;

    let delta = units.get();
    if !product.has_available(delta) {
        return Err(not_enough(product));
    }

    let line_position = cart.line_position(product_id);
    let new_units = match line_position {
        Some(pos) => cart.lines()[pos]
            .units()
            .checked_add(delta)
            .ok_or_else(|| not_enough(product))?,
        None => delta,
    };

    product.reserve(delta)?;
    match line_position {
        Some(pos) => cart.lines_mut()[pos].set_units(new_units),
        None => cart.lines_mut().push(CartLine::new(product_id, units)),
    }

    Ok(cart.clone())
}

/// Release `units` of `product_id` from cart `cart_id` back to stock.
///
/// Checks, in order: the cart exists, the cart holds the product, the product
/// exists in the catalog, the line holds at least `units`, and the product's
/// stock can take the units back. A line that reaches zero units is removed
/// from the cart.
pub fn remove_units(
    carts: &mut [Cart],
    products: &mut [Product],
    cart_id: CartId,
    product_id: ProductId,
    units: Units,
) -> DomainResult<Removal> {
    let cart = entity::find_mut(carts, cart_id).ok_or_else(|| cart::not_found(cart_id))?;
    let pos = cart.line_position(product_id).ok_or_else(|| {
        DomainError::not_found(format!(
            "Product with id {product_id} not found in cart {cart_id}."
        ))
    })?;
    let product =
        entity::find_mut(products, product_id).ok_or_else(|| catalog::not_found(product_id))?;

    let delta = units.get();
    let held = cart.lines()[pos].units();
    if delta > held {
        return Err(DomainError::insufficient_stock(format!(
            "There are not enough units of the product {} to delete.",
            product.code()
        )));
    }

    product.release(delta)?;
    let remaining = held - delta;
    if remaining == 0 {
        cart.lines_mut().remove(pos);
    } else {
        cart.lines_mut()[pos].set_units(remaining);
    }

    Ok(Removal {
        cart_id,
        product_id,
        remaining_units: remaining,
    })
}

fn not_enough(product: &Product) -> DomainError {
    DomainError::insufficient_stock(format!(
        "There are not enough units of the product {}.",
        product.code()
    ))
}
