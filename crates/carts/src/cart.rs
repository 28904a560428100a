use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{CartId, DomainError, DomainResult, Entity, ProductId, entity};

/// A positive number of product units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Units(u64);

impl Units {
    /// Zero is rejected: adding or removing nothing is not a valid request.
    pub fn new(value: u64) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::validation("units must be a positive integer"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for Units {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|_| DomainError::validation("units must be a positive integer"))?;
        Self::new(value)
    }
}

/// Units of one product held by a cart. Never zero while stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    product_id: ProductId,
    units: u64,
}

impl CartLine {
    pub(crate) fn new(product_id: ProductId, units: Units) -> Self {
        Self {
            product_id,
            units: units.get(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    pub(crate) fn set_units(&mut self, units: u64) {
        self.units = units;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    #[serde(default)]
    products: Vec<CartLine>,
}

impl Cart {
    /// A new empty cart with the next id after those in `carts`.
    pub fn next_empty(carts: &[Cart]) -> Self {
        Self {
            id: entity::next_id(carts, CartId::new(1), CartId::next),
            products: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.products
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.products.iter().find(|l| l.product_id == product_id)
    }

    pub(crate) fn line_position(&self, product_id: ProductId) -> Option<usize> {
        self.products.iter().position(|l| l.product_id == product_id)
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<CartLine> {
        &mut self.products
    }

    pub fn references(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> CartId {
        self.id
    }
}

pub fn not_found(id: CartId) -> DomainError {
    DomainError::not_found(format!("Cart with id {id} not found."))
}

/// Units of `product_id` reserved across all `carts`.
pub fn reserved_units(carts: &[Cart], product_id: ProductId) -> u64 {
    carts
        .iter()
        .filter_map(|c| c.line(product_id))
        .map(CartLine::units)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_units_are_rejected() {
        assert_eq!(
            Units::new(0).unwrap_err(),
            DomainError::validation("units must be a positive integer")
        );
        assert!("0".parse::<Units>().is_err());
        assert!("-3".parse::<Units>().is_err());
        assert!("two".parse::<Units>().is_err());
        assert_eq!("4".parse::<Units>().unwrap().get(), 4);
    }

    #[test]
    fn next_empty_cart_ids() {
        let first = Cart::next_empty(&[]);
        assert_eq!(first.id(), CartId::new(1));
        let second = Cart::next_empty(&[first]);
        assert_eq!(second.id(), CartId::new(2));
        assert!(second.lines().is_empty());
    }

    #[test]
    fn line_uses_id_key_on_the_wire() {
        let json = r#"{"id":3,"products":[{"id":7,"units":2}]}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.line(ProductId::new(7)).map(CartLine::units), Some(2));
        assert_eq!(serde_json::to_string(&cart).unwrap(), json);
    }

    #[test]
    fn reserved_units_sums_across_carts() {
        let carts: Vec<Cart> = serde_json::from_str(
            r#"[{"id":1,"products":[{"id":1,"units":2},{"id":2,"units":1}]},
                {"id":2,"products":[{"id":1,"units":5}]},
                {"id":3,"products":[]}]"#,
        )
        .unwrap();
        assert_eq!(reserved_units(&carts, ProductId::new(1)), 7);
        assert_eq!(reserved_units(&carts, ProductId::new(2)), 1);
        assert_eq!(reserved_units(&carts, ProductId::new(3)), 0);
    }
}
