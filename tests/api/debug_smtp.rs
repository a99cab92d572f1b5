use crate::helpers::{smtp_settings, spawn_app, spawn_app_with, MockTransport, SMTP_PASSWORD};
use contacts_api::configuration::SmtpSettings;
use contacts_api::email_client::TransportFailure;
use contacts_api::startup::RouteGroups;

#[tokio::test]
async fn smtp_check_returns_ok_when_verify_passes() {
    let app = spawn_app().await;

    let response = app.get("/_debug/smtp").await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "SMTP verify passed");
    assert_eq!(app.transport.verifications(), 1);
}

#[tokio::test]
async fn smtp_check_returns_a_500_with_transport_diagnostics() {
    let failure = TransportFailure {
        message: "permanent error (535): authentication failed".into(),
        code: Some("permanent".into()),
        command: Some("AUTH PLAIN".into()),
        response: Some("5.7.8 Username and Password not accepted".into()),
        response_code: Some(535),
    };
    let app = spawn_app_with(
        smtp_settings(),
        MockTransport::failing_with(failure),
        RouteGroups::default(),
    )
    .await;

    let response = app.get("/_debug/smtp").await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "ok": false,
            "message": "permanent error (535): authentication failed",
            "code": "permanent",
            "command": "AUTH PLAIN",
            "response": "5.7.8 Username and Password not accepted",
            "responseCode": 535,
        })
    );
}

#[tokio::test]
async fn smtp_check_reports_missing_diagnostics_as_null() {
    let app = spawn_app_with(
        smtp_settings(),
        MockTransport::failing_with(TransportFailure::new("Connection refused")),
        RouteGroups::default(),
    )
    .await;

    let body = app.get("/_debug/smtp").await.json::<serde_json::Value>().await.unwrap();

    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Connection refused");
    assert!(body["code"].is_null());
    assert!(body["command"].is_null());
    assert!(body["response"].is_null());
    assert!(body["responseCode"].is_null());
}

#[tokio::test]
async fn smtp_check_fails_without_a_handshake_when_settings_are_missing() {
    let app = spawn_app_with(
        SmtpSettings {
            password: None,
            ..smtp_settings()
        },
        MockTransport::default(),
        RouteGroups::default(),
    )
    .await;

    let response = app.get("/_debug/smtp").await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], "configuration");
    assert!(body["message"].as_str().unwrap().contains("SMTP_PASSWORD"));
    assert_eq!(app.transport.verifications(), 0);
}

#[tokio::test]
async fn env_smtp_returns_the_non_secret_settings() {
    let app = spawn_app().await;

    let body = app.get_json("/_debug/env-smtp").await;

    assert_eq!(body["SMTP_HOST"], "smtp.example.com");
    assert_eq!(body["SMTP_PORT"], "587");
    assert_eq!(body["SMTP_USER"], "mailer@example.com");
    assert_eq!(body["SMTP_FROM"], "Contacts <mailer@example.com>");
    assert_eq!(body["note"], "The password is not shown for security reasons.");
    assert!(body.get("SMTP_PASSWORD").is_none());
}

#[tokio::test]
async fn env_smtp_never_contains_the_password() {
    let app = spawn_app().await;

    let response = app.get("/_debug/env-smtp").await;

    assert_eq!(200, response.status().as_u16());
    let text = response.text().await.unwrap();
    assert!(!text.contains(SMTP_PASSWORD));
}

#[tokio::test]
async fn env_smtp_reports_unset_values_as_null() {
    let app = spawn_app_with(
        SmtpSettings::default(),
        MockTransport::default(),
        RouteGroups::default(),
    )
    .await;

    let body = app.get_json("/_debug/env-smtp").await;

    assert!(body["SMTP_HOST"].is_null());
    assert!(body["SMTP_PORT"].is_null());
    assert!(body["SMTP_USER"].is_null());
    assert!(body["SMTP_FROM"].is_null());
}
