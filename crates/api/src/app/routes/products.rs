use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::Response,
    routing::get,
};

use storefront_infra::ShopService;
use storefront_products::{NewProduct, ProductPatch};

use crate::app::routes::common;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:pid",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(services): Extension<Arc<ShopService>>,
    query: Result<Query<dto::ListProductsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "limit must be a non-negative integer");
        }
    };
    match common::run(services, move |s| s.list_products(query.limit)).await {
        Ok(products) => dto::ok(products),
        Err(resp) => resp,
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<ShopService>>,
    Path(pid): Path<String>,
) -> Response {
    let id = match common::product_id(&pid) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match common::run(services, move |s| s.get_product(id)).await {
        Ok(product) => dto::ok(product),
        Err(resp) => resp,
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<ShopService>>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Response {
    let new = match common::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match common::run(services, move |s| s.create_product(new)).await {
        Ok(product) => dto::created(product),
        Err(resp) => resp,
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<ShopService>>,
    Path(pid): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Response {
    let id = match common::product_id(&pid) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let patch = match common::json_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match common::run(services, move |s| s.update_product(id, patch)).await {
        Ok(product) => dto::ok(product),
        Err(resp) => resp,
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<ShopService>>,
    Path(pid): Path<String>,
) -> Response {
    let id = match common::product_id(&pid) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match common::run(services, move |s| s.delete_product(id)).await {
        Ok(remaining) => dto::ok(remaining),
        Err(resp) => resp,
    }
}
