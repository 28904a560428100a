//! Request DTOs and the response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Every JSON response has the shape `{ "status": <code>, "response": <payload> }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub response: T,
}

pub fn envelope<T: Serialize>(status: StatusCode, response: T) -> Response {
    (
        status,
        Json(Envelope {
            status: status.as_u16(),
            response,
        }),
    )
        .into_response()
}

pub fn ok<T: Serialize>(response: T) -> Response {
    envelope(StatusCode::OK, response)
}

pub fn created<T: Serialize>(response: T) -> Response {
    envelope(StatusCode::CREATED, response)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub limit: Option<usize>,
}

/// Path segments of `/carts/:cid/product/:pid/:units`.
#[derive(Debug, Deserialize)]
pub struct CartProductPath {
    pub cid: String,
    pub pid: String,
    pub units: String,
}
