//! src/startup.rs
use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::middleware::{cors, json_config, parse_cookies};
use crate::routes::{
    health_check, list_routes, not_found, render_error, smtp_check, smtp_environment, AuthRoutes,
    ContactsRoutes, RouteGroup, RouteMount, RouteRegistry,
};
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{from_fn, ErrorHandlers};
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// The route groups mounted at `/auth` and `/contacts`.
#[derive(Clone)]
pub struct RouteGroups {
    pub auth: Arc<dyn RouteGroup>,
    pub contacts: Arc<dyn RouteGroup>,
}

impl Default for RouteGroups {
    fn default() -> Self {
        Self {
            auth: Arc::new(AuthRoutes),
            contacts: Arc::new(ContactsRoutes),
        }
    }
}

/// Assemble the application without binding it to a socket.
///
/// Nothing here touches the SMTP settings, so a missing or broken mail
/// configuration only shows up on the endpoints that use it.
pub fn build_app(
    email_client: web::Data<EmailClient>,
    registry: web::Data<RouteRegistry>,
    groups: &RouteGroups,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let routes = registry.clone();

    // actix runs the last `wrap` first: CORS, request logging, cookie parsing,
    // then the error handler closest to the routes. JSON bodies are parsed by
    // the extractor configured through `json_config`.
    App::new()
        .wrap(ErrorHandlers::new().default_handler(render_error))
        .wrap(from_fn(parse_cookies))
        .wrap(TracingLogger::default())
        .wrap(cors())
        .app_data(json_config())
        .app_data(email_client)
        .app_data(registry)
        .configure(|config| {
            RouteMount::new(config, &routes, "")
                .get("/_debug/routes", list_routes)
                .get("/_debug/smtp", smtp_check)
                .get("/health", health_check)
                .group("/auth", groups.auth.as_ref())
                .group("/contacts", groups.contacts.as_ref())
                .get("/_debug/env-smtp", smtp_environment);
        })
        .default_service(web::to(not_found))
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    groups: RouteGroups,
) -> Result<Server, std::io::Error> {
    let email_client = web::Data::new(email_client);
    let registry = web::Data::new(RouteRegistry::new());
    let server = HttpServer::new(move || {
        build_app(email_client.clone(), registry.clone(), &groups)
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let email_client = EmailClient::smtp(configuration.smtp.clone());
        Self::build_with(configuration, email_client, RouteGroups::default())
    }

    /// Like [`Application::build`], with the mail adapter and route groups supplied by the caller.
    pub fn build_with(
        configuration: Settings,
        email_client: EmailClient,
        groups: RouteGroups,
    ) -> Result<Self, std::io::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, email_client, groups)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
