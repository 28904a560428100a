use axum::http::StatusCode;
use axum::response::Response;

use storefront_core::DomainError;
use storefront_infra::ServiceError;

use crate::app::dto;

const INTERNAL_MESSAGE: &str = "Internal server error.";

pub fn service_error_to_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            // The cause stays in the logs; clients get a generic message.
            tracing::error!(error = %e, "storage failure");
            internal_error()
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InsufficientStock(_) => StatusCode::BAD_REQUEST,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
    };
    json_error(status, err.to_string())
}

pub fn internal_error() -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    dto::envelope(status, message.into())
}
