use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use storefront_core::{CartId, DomainError, ProductId};
use storefront_infra::{ServiceResult, ShopService};

use crate::app::errors;

/// Run a service call on the blocking pool (it does file IO under a mutex)
/// and map failures to error responses.
pub async fn run<T, F>(services: Arc<ShopService>, call: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&ShopService) -> ServiceResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(&services)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(errors::service_error_to_response(e)),
        Err(e) => {
            tracing::error!(error = %e, "service task failed");
            Err(errors::internal_error())
        }
    }
}

/// Unwrap a JSON body or turn the rejection into a 400 envelope.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(v)| v)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, e.body_text()))
}

/// A segment that does not parse as an id names a cart that cannot exist.
pub fn cart_id(raw: &str) -> Result<CartId, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::not_found(format!("Cart with id {raw} not found.")))
}

pub fn product_id(raw: &str) -> Result<ProductId, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::not_found(format!("Product with id {raw} not found.")))
}
