//! src/routes/debug.rs
//!
//! Operational introspection. Not meant for end users.
use crate::email_client::{EmailClient, TransportFailure};
use crate::routes::RouteRegistry;
use actix_web::{web, HttpResponse};

const PASSWORD_NOTE: &str = "The password is not shown for security reasons.";

pub async fn list_routes(registry: web::Data<RouteRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.entries())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SmtpCheckFailed {
    ok: bool,
    message: String,
    code: Option<String>,
    command: Option<String>,
    response: Option<String>,
    response_code: Option<u16>,
}

impl From<TransportFailure> for SmtpCheckFailed {
    fn from(failure: TransportFailure) -> Self {
        Self {
            ok: false,
            message: failure.message,
            code: failure.code,
            command: failure.command,
            response: failure.response,
            response_code: failure.response_code,
        }
    }
}

/// The one place a mail error is caught instead of propagated.
#[tracing::instrument(name = "Checking SMTP connectivity", skip(email_client))]
pub async fn smtp_check(email_client: web::Data<EmailClient>) -> HttpResponse {
    match email_client.verify().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "message": "SMTP verify passed",
        })),
        Err(e) => {
            tracing::warn!(error = ?e, "SMTP verify failed");
            HttpResponse::InternalServerError().json(SmtpCheckFailed::from(e.diagnostics()))
        }
    }
}

#[derive(serde::Serialize)]
struct SmtpEnvironment<'a> {
    #[serde(rename = "SMTP_HOST")]
    host: Option<&'a str>,
    #[serde(rename = "SMTP_PORT")]
    port: Option<&'a str>,
    #[serde(rename = "SMTP_USER")]
    user: Option<&'a str>,
    #[serde(rename = "SMTP_FROM")]
    from: Option<&'a str>,
    note: &'static str,
}

/// Non-secret SMTP settings. `SMTP_PASSWORD` has no field here on purpose.
pub async fn smtp_environment(email_client: web::Data<EmailClient>) -> HttpResponse {
    let settings = email_client.settings();
    HttpResponse::Ok().json(SmtpEnvironment {
        host: settings.host.as_deref(),
        port: settings.port.as_deref(),
        user: settings.user.as_deref(),
        from: settings.from.as_deref(),
        note: PASSWORD_NOTE,
    })
}
