use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

/// Catalog entry.
///
/// `stock` counts the units still available for reservation. Units placed in
/// a cart are moved out of `stock`, so it can never go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    description: String,
    code: String,
    price: f64,
    status: bool,
    stock: u64,
    category: String,
    #[serde(default)]
    thumbnails: Vec<String>,
}

impl Product {
    /// Build a product from already validated parts.
    ///
    /// Callers outside this crate go through [`crate::create_product`].
    pub(crate) fn from_new(id: ProductId, new: ValidNewProduct) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            code: new.code,
            price: new.price,
            status: true,
            stock: new.stock,
            category: new.category,
            thumbnails: new.thumbnails,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn thumbnails(&self) -> &[String] {
        &self.thumbnails
    }

    /// Whether `units` can be taken out of the available stock.
    pub fn has_available(&self, units: u64) -> bool {
        self.stock >= units
    }

    /// Move `units` from available stock into a reservation.
    pub fn reserve(&mut self, units: u64) -> DomainResult<()> {
        self.stock = self.stock.checked_sub(units).ok_or_else(|| {
            DomainError::insufficient_stock(format!(
                "There are not enough units of the product {}.",
                self.code
            ))
        })?;
        Ok(())
    }

    /// Return `units` from a reservation to available stock.
    ///
    /// Fails without touching `stock` when the sum does not fit, which can only
    /// happen after stock was patched close to `u64::MAX` while units were held.
    pub fn release(&mut self, units: u64) -> DomainResult<()> {
        self.stock = self.stock.checked_add(units).ok_or_else(|| {
            DomainError::conflict(format!(
                "Stock of product {} cannot take back {units} units.",
                self.code
            ))
        })?;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Request body for product creation.
///
/// Every field is optional at the wire level so that a missing field becomes
/// a domain validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

#[derive(Debug)]
pub(crate) struct ValidNewProduct {
    title: String,
    description: String,
    code: String,
    price: f64,
    stock: u64,
    category: String,
    thumbnails: Vec<String>,
}

impl ValidNewProduct {
    pub(crate) fn code(&self) -> &str {
        &self.code
    }
}

impl NewProduct {
    pub(crate) fn validate(self) -> DomainResult<ValidNewProduct> {
        let required = || DomainError::validation("All fields are required.");

        let title = self.title.filter(|s| !s.trim().is_empty()).ok_or_else(required)?;
        let description = self
            .description
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(required)?;
        let code = self.code.filter(|s| !s.trim().is_empty()).ok_or_else(required)?;
        let category = self
            .category
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(required)?;
        let price = self.price.ok_or_else(required)?;
        let stock = self.stock.ok_or_else(required)?;
        ensure_valid_price(price)?;

        Ok(ValidNewProduct {
            title,
            description,
            code,
            price,
            stock,
            category,
            thumbnails: self.thumbnails.unwrap_or_default(),
        })
    }
}

/// Partial update for an existing product.
///
/// Absent fields keep their stored values. `code` may be echoed back but
/// never changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<u64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl Product {
    /// Produce the patched product without touching `self`.
    pub fn patched(&self, patch: ProductPatch) -> DomainResult<Product> {
        if let Some(code) = &patch.code {
            if code != &self.code {
                return Err(DomainError::validation("Cannot modify product code."));
            }
        }
        if let Some(price) = patch.price {
            ensure_valid_price(price)?;
        }

        let mut next = self.clone();
        if let Some(title) = non_blank(patch.title, "title")? {
            next.title = title;
        }
        if let Some(description) = non_blank(patch.description, "description")? {
            next.description = description;
        }
        if let Some(category) = non_blank(patch.category, "category")? {
            next.category = category;
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(stock) = patch.stock {
            next.stock = stock;
        }
        if let Some(thumbnails) = patch.thumbnails {
            next.thumbnails = thumbnails;
        }
        Ok(next)
    }
}

fn ensure_valid_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::validation("price must be a positive number"));
    }
    Ok(())
}

fn non_blank(value: Option<String>, field: &str) -> DomainResult<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(DomainError::validation(format!("{field} cannot be empty")))
        }
        other => Ok(other),
    }
}
