use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path},
    response::Response,
    routing::{get, put},
};

use storefront_carts::Units;
use storefront_core::{CartId, DomainResult, ProductId};
use storefront_infra::ShopService;

use crate::app::routes::common;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_carts).post(create_cart))
        .route("/:cid", get(get_cart))
        .route(
            "/:cid/product/:pid/:units",
            put(add_product_units).delete(remove_product_units),
        )
}

pub async fn list_carts(Extension(services): Extension<Arc<ShopService>>) -> Response {
    match common::run(services, |s| s.list_carts()).await {
        Ok(carts) => dto::ok(carts),
        Err(resp) => resp,
    }
}

pub async fn get_cart(
    Extension(services): Extension<Arc<ShopService>>,
    Path(cid): Path<String>,
) -> Response {
    let id = match common::cart_id(&cid) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match common::run(services, move |s| s.get_cart(id)).await {
        Ok(cart) => dto::ok(cart),
        Err(resp) => resp,
    }
}

pub async fn create_cart(Extension(services): Extension<Arc<ShopService>>) -> Response {
    match common::run(services, |s| s.create_cart()).await {
        Ok(cart) => dto::created(cart),
        Err(resp) => resp,
    }
}

pub async fn add_product_units(
    Extension(services): Extension<Arc<ShopService>>,
    Path(path): Path<dto::CartProductPath>,
) -> Response {
    let (cart_id, product_id, units) = match parse_cart_product(&path) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match common::run(services, move |s| s.add_units(cart_id, product_id, units)).await {
        Ok(cart) => dto::ok(cart),
        Err(resp) => resp,
    }
}

pub async fn remove_product_units(
    Extension(services): Extension<Arc<ShopService>>,
    Path(path): Path<dto::CartProductPath>,
) -> Response {
    let (cart_id, product_id, units) = match parse_cart_product(&path) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match common::run(services, move |s| s.remove_units(cart_id, product_id, units)).await {
        Ok(removal) => dto::ok(removal.message()),
        Err(resp) => resp,
    }
}

fn parse_cart_product(path: &dto::CartProductPath) -> DomainResult<(CartId, ProductId, Units)> {
    Ok((
        common::cart_id(&path.cid)?,
        common::product_id(&path.pid)?,
        path.units.parse()?,
    ))
}
