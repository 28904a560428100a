//! Application service for the catalog and carts.
//!
//! Every operation follows the same cycle while holding the lock of each
//! collection it touches:
//!
//! ```text
//! load collection(s) -> run domain rule in memory -> save collection(s)
//! ```
//!
//! Nothing is saved when the domain rule fails. Operations that touch both
//! collections always lock carts first, then products.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use storefront_carts::{Cart, Removal, Units, reconciler};
use storefront_core::{CartId, DomainError, Entity, ProductId, entity};
use storefront_products::{NewProduct, Product, ProductPatch, catalog};

use crate::config::StoreConfig;
use crate::store::{CollectionStore, JsonFileStore, LoadOutcome, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

type SharedStore<T> = Arc<dyn CollectionStore<T>>;

/// Catalog + cart operations over two independently locked collections.
pub struct ShopService {
    products: Mutex<SharedStore<Product>>,
    carts: Mutex<SharedStore<Cart>>,
}

impl core::fmt::Debug for ShopService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShopService").finish_non_exhaustive()
    }
}

impl ShopService {
    pub fn new(products: SharedStore<Product>, carts: SharedStore<Cart>) -> Self {
        Self {
            products: Mutex::new(products),
            carts: Mutex::new(carts),
        }
    }

    /// JSON documents under `config.data_dir`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            Arc::new(JsonFileStore::<Product>::new(config.products_path())),
            Arc::new(JsonFileStore::<Cart>::new(config.carts_path())),
        )
    }

    // -------------------------
    // Catalog
    // -------------------------

    pub fn list_products(&self, limit: Option<usize>) -> ServiceResult<Vec<Product>> {
        let store = lock(&self.products);
        let products = load(&**store, "products")?;
        Ok(catalog::take_limited(products, limit))
    }

    pub fn get_product(&self, id: ProductId) -> ServiceResult<Product> {
        let store = lock(&self.products);
        let products = load(&**store, "products")?;
        entity::find(&products, id)
            .cloned()
            .ok_or_else(|| catalog::not_found(id).into())
    }

    pub fn create_product(&self, new: NewProduct) -> ServiceResult<Product> {
        let store = lock(&self.products);
        let mut products = load(&**store, "products")?;

        let product = catalog::create_product(&products, new).inspect_err(rejected("create_product"))?;
        products.push(product.clone());
        store.save(&products).inspect_err(save_failed("products"))?;

        tracing::info!(product_id = %product.id(), code = product.code(), stock = product.stock(), "product created");
        Ok(product)
    }

    pub fn update_product(&self, id: ProductId, patch: ProductPatch) -> ServiceResult<Product> {
        let store = lock(&self.products);
        let mut products = load(&**store, "products")?;

        let product =
            catalog::update_product(&mut products, id, patch).inspect_err(rejected("update_product"))?;
        store.save(&products).inspect_err(save_failed("products"))?;

        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Delete a product and return the remaining catalog.
    ///
    /// Refused while any cart still holds units of the product.
    pub fn delete_product(&self, id: ProductId) -> ServiceResult<Vec<Product>> {
        let carts_store = lock(&self.carts);
        let products_store = lock(&self.products);
        let mut products = load(&**products_store, "products")?;

        let pos = entity::position_of(&products, id)
            .ok_or_else(|| catalog::not_found(id))
            .inspect_err(rejected("delete_product"))?;

        let carts = load(&**carts_store, "carts")?;
        if let Some(cart) = carts.iter().find(|c| c.references(id)) {
            let err = DomainError::conflict(format!(
                "Product with id {id} is reserved in cart {}.",
                cart.id()
            ));
            rejected("delete_product")(&err);
            return Err(err.into());
        }

        products.remove(pos);
        products_store
            .save(&products)
            .inspect_err(save_failed("products"))?;

        tracing::info!(product_id = %id, "product deleted");
        Ok(products)
    }

    // -------------------------
    // Carts
    // -------------------------

    pub fn list_carts(&self) -> ServiceResult<Vec<Cart>> {
        let store = lock(&self.carts);
        load(&**store, "carts")
    }

    pub fn get_cart(&self, id: CartId) -> ServiceResult<Cart> {
        let store = lock(&self.carts);
        let carts = load(&**store, "carts")?;
        entity::find(&carts, id)
            .cloned()
            .ok_or_else(|| storefront_carts::cart::not_found(id).into())
    }

    pub fn create_cart(&self) -> ServiceResult<Cart> {
        let store = lock(&self.carts);
        let mut carts = load(&**store, "carts")?;

        let cart = Cart::next_empty(&carts);
        carts.push(cart.clone());
        store.save(&carts).inspect_err(save_failed("carts"))?;

        tracing::info!(cart_id = %cart.id(), "cart created");
        Ok(cart)
    }

    /// Reserve `units` of a product in a cart.
    pub fn add_units(&self, cart_id: CartId, product_id: ProductId, units: Units) -> ServiceResult<Cart> {
        let carts_store = lock(&self.carts);
        let products_store = lock(&self.products);
        let mut carts = load(&**carts_store, "carts")?;
        let mut products = load(&**products_store, "products")?;
        let carts_before = carts.clone();

        let cart = reconciler::add_units(&mut carts, &mut products, cart_id, product_id, units)
            .inspect_err(rejected("add_units"))?;
        save_both(&**carts_store, &carts, &carts_before, &**products_store, &products)?;

        tracing::info!(cart_id = %cart_id, product_id = %product_id, units = units.get(), "units reserved");
        Ok(cart)
    }

    /// Release `units` of a product from a cart back to stock.
    pub fn remove_units(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        units: Units,
    ) -> ServiceResult<Removal> {
        let carts_store = lock(&self.carts);
        let products_store = lock(&self.products);
        let mut carts = load(&**carts_store, "carts")?;
        let mut products = load(&**products_store, "products")?;
        let carts_before = carts.clone();

        let removal = reconciler::remove_units(&mut carts, &mut products, cart_id, product_id, units)
            .inspect_err(rejected("remove_units"))?;
        save_both(&**carts_store, &carts, &carts_before, &**products_store, &products)?;

        tracing::info!(
            cart_id = %cart_id,
            product_id = %product_id,
            units = units.get(),
            line_removed = removal.line_removed(),
            "units released"
        );
        Ok(removal)
    }
}

/// The collection documents live outside the mutex, so a poisoned lock holds
/// no torn state and can be taken over.
fn lock<T: ?Sized>(m: &Mutex<Arc<T>>) -> MutexGuard<'_, Arc<T>> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn load<T>(store: &dyn CollectionStore<T>, collection: &'static str) -> ServiceResult<Vec<T>> {
    match store.load() {
        Ok(LoadOutcome::Loaded(items)) => Ok(items),
        Ok(LoadOutcome::Missing) => {
            tracing::debug!(collection, "no stored document yet; starting empty");
            Ok(Vec::new())
        }
        Err(e) => {
            tracing::error!(collection, error = %e, "failed to load collection");
            Err(e.into())
        }
    }
}

/// Persist carts, then products. If the products write fails, put the old
/// carts document back so the two stay consistent.
fn save_both(
    carts_store: &dyn CollectionStore<Cart>,
    carts: &[Cart],
    carts_before: &[Cart],
    products_store: &dyn CollectionStore<Product>,
    products: &[Product],
) -> ServiceResult<()> {
    carts_store.save(carts).inspect_err(save_failed("carts"))?;
    if let Err(e) = products_store.save(products) {
        save_failed("products")(&e);
        if let Err(restore) = carts_store.save(carts_before) {
            tracing::error!(error = %restore, "failed to restore carts after products write failure");
        }
        return Err(e.into());
    }
    Ok(())
}

fn rejected(op: &'static str) -> impl Fn(&DomainError) {
    move |e: &DomainError| tracing::debug!(op, kind = e.kind(), reason = %e, "request rejected")
}

fn save_failed(collection: &'static str) -> impl Fn(&StoreError) {
    move |e: &StoreError| tracing::error!(collection, error = %e, "failed to save collection")
}
