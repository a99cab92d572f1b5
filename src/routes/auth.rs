//! src/routes/auth.rs
use crate::routes::{ApiError, RouteGroup, RouteMount};
use actix_web::{web, HttpRequest, HttpResponse};

/// Route table of the authentication collaborator.
///
/// Session handling lives outside this crate; a host that has it mounts its own
/// [`RouteGroup`] at `/auth` instead. Until then every route answers 501.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthRoutes;

impl RouteGroup for AuthRoutes {
    fn mount(&self, routes: &mut RouteMount<'_>) {
        routes
            .post("/register", with_body)
            .post("/login", with_body)
            .post("/logout", with_session)
            .post("/refresh", with_session)
            .post("/send-reset-email", with_body)
            .post("/reset-pwd", with_body);
    }
}

async fn with_body(
    req: HttpRequest,
    _body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_wired(&req))
}

async fn with_session(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    tracing::debug!(
        has_session = req.cookie("sessionId").is_some(),
        has_refresh_token = req.cookie("refreshToken").is_some(),
        "Session cookies"
    );
    Err(ApiError::not_wired(&req))
}
