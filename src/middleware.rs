//! src/middleware.rs
//!
//! Cross-cutting request processing shared by every route.
use crate::routes::ApiError;
use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::web;

/// Same limit `express.json()` applies by default.
const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Any origin, any method, any header.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// JSON extraction settings. Unparseable bodies become a 400 in the
/// standard error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid JSON body: {}", err)).into())
}

/// Parse the `Cookie` header before the handler runs.
///
/// A malformed header is logged and the request carries on without cookies.
pub async fn parse_cookies(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    match req.cookies() {
        Ok(cookies) => tracing::debug!(count = cookies.len(), "Parsed request cookies"),
        Err(e) => tracing::warn!("Ignoring malformed Cookie header: {}", e),
    }
    next.call(req).await
}
