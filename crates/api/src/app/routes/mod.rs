use axum::Router;

pub mod carts;
pub mod common;
pub mod products;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/carts", carts::router())
}
