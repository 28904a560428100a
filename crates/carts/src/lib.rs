//! Carts domain module.
//!
//! Holds the cart model and the cart/inventory reconciliation rules that move
//! units between a product's available stock and cart reservations. Pure
//! domain logic: callers load the collections, run an operation, and persist
//! only when it succeeds.

pub mod cart;
pub mod reconciler;

pub use cart::{Cart, CartLine, Units, reserved_units};
pub use reconciler::{Removal, add_units, remove_units};
