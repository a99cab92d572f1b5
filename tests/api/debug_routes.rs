use crate::helpers::{smtp_settings, spawn_app, spawn_app_with, MockTransport};
use actix_web::HttpResponse;
use contacts_api::routes::{AuthRoutes, RouteGroup, RouteMount};
use contacts_api::startup::RouteGroups;
use serde_json::json;
use std::sync::Arc;

struct NoRoutes;

impl RouteGroup for NoRoutes {
    fn mount(&self, _routes: &mut RouteMount<'_>) {}
}

struct ArchiveRoutes;

impl RouteGroup for ArchiveRoutes {
    fn mount(&self, routes: &mut RouteMount<'_>) {
        routes
            .get("/archive", archive)
            .delete("/archive", archive)
            .post("/archive/{contact_id}", archive);
    }
}

async fn archive() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[tokio::test]
async fn routes_lists_every_mounted_route_with_its_methods() {
    let app = spawn_app().await;

    let response = app.get("/_debug/routes").await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            { "path": "/_debug/routes", "methods": ["get"] },
            { "path": "/_debug/smtp", "methods": ["get"] },
            { "path": "/health", "methods": ["get"] },
            { "path": "/auth/register", "methods": ["post"] },
            { "path": "/auth/login", "methods": ["post"] },
            { "path": "/auth/logout", "methods": ["post"] },
            { "path": "/auth/refresh", "methods": ["post"] },
            { "path": "/auth/send-reset-email", "methods": ["post"] },
            { "path": "/auth/reset-pwd", "methods": ["post"] },
            { "path": "/contacts", "methods": ["get", "post"] },
            { "path": "/contacts/{contact_id}", "methods": ["get", "patch", "delete"] },
            { "path": "/_debug/env-smtp", "methods": ["get"] },
        ])
    );
}

#[tokio::test]
async fn a_group_without_routes_is_listed_as_nothing() {
    let groups = RouteGroups {
        auth: Arc::new(NoRoutes),
        contacts: Arc::new(NoRoutes),
    };
    let app = spawn_app_with(smtp_settings(), MockTransport::default(), groups).await;

    let response = app.get("/_debug/routes").await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    let paths: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["/_debug/routes", "/_debug/smtp", "/health", "/_debug/env-smtp"]
    );
}

#[tokio::test]
async fn routes_reflects_a_custom_group_exactly() {
    let groups = RouteGroups {
        auth: Arc::new(AuthRoutes),
        contacts: Arc::new(ArchiveRoutes),
    };
    let app = spawn_app_with(smtp_settings(), MockTransport::default(), groups).await;

    let body = app.get_json("/_debug/routes").await;
    let contacts: Vec<&serde_json::Value> = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|entry| entry["path"].as_str().unwrap().starts_with("/contacts"))
        .collect();

    assert_eq!(
        contacts,
        vec![
            &json!({ "path": "/contacts/archive", "methods": ["get", "delete"] }),
            &json!({ "path": "/contacts/archive/{contact_id}", "methods": ["post"] }),
        ]
    );

    // The listed routes are the ones actually served.
    let response = app.get("/contacts/archive").await;
    assert_eq!(204, response.status().as_u16());
}
