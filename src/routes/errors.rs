//! src/routes/errors.rs
use crate::routes::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, ResponseError};

/// Errors raised by route handlers.
///
/// Only the status code is decided here; the body is rendered by
/// [`render_error`](crate::routes::render_error).
#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0} is served by a collaborator that is not wired into this server")]
    NotImplemented(String),
}

impl ApiError {
    pub fn not_wired(req: &HttpRequest) -> Self {
        ApiError::NotImplemented(format!("{} {}", req.method(), req.path()))
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }
}
