//! src/routes/contacts.rs
use crate::routes::{ApiError, RouteGroup, RouteMount};
use actix_web::{web, HttpRequest, HttpResponse};

/// Route table of the contacts collaborator. Every route answers 501 until a
/// host mounts a real implementation at `/contacts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactsRoutes;

impl RouteGroup for ContactsRoutes {
    fn mount(&self, routes: &mut RouteMount<'_>) {
        routes
            .get("", without_body)
            .post("", with_body)
            .get("/{contact_id}", without_body)
            .patch("/{contact_id}", with_body)
            .delete("/{contact_id}", without_body);
    }
}

async fn without_body(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_wired(&req))
}

async fn with_body(
    req: HttpRequest,
    _body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_wired(&req))
}
