//! src/routes/fallback.rs
use actix_web::dev::ServiceResponse;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::HttpResponse;

#[derive(serde::Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

/// Default service: nothing else matched.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        status: 404,
        message: "Route not found".into(),
        data: None,
    })
}

/// Terminal error handler.
///
/// Rewrites every response that carries an error into `{status, message, data}`.
/// Responses built directly by a handler are passed through untouched, even
/// when their status is 4xx/5xx.
pub fn render_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let failure = res
        .response()
        .error()
        .map(|error| (error.to_string(), format!("{:?}", error)));
    let Some((message, chain)) = failure else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let status = res.status();
    let body = if status.as_u16() == 500 {
        tracing::error!(error = %chain, "Unhandled error while serving {}", res.request().path());
        ErrorBody {
            status: status.as_u16(),
            message: "Something went wrong".into(),
            data: Some(message),
        }
    } else {
        tracing::warn!(status = status.as_u16(), "Request failed: {}", message);
        ErrorBody {
            status: status.as_u16(),
            message,
            data: None,
        }
    };

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, HttpResponse::build(status).json(body));
    Ok(ErrorHandlerResponse::Response(res.map_into_right_body()))
}
