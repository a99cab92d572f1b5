//! src/smtp_transport.rs
use crate::configuration::TransportConfig;
use crate::domain::DeliveryReceipt;
use crate::email_client::{MailTransport, PreparedEmail, TransportFailure};
use chrono::Utc;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use uuid::Uuid;

/// [`MailTransport`] speaking SMTP through `lettre`.
///
/// A fresh connection is opened for every call; nothing is pooled between requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpTransport;

impl SmtpTransport {
    fn connect(
        config: &TransportConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportFailure> {
        let parameters = TlsParameters::new(config.host.clone()).map_err(|e| smtp_failure(&e))?;
        let tls = if config.implicit_tls() {
            Tls::Wrapper(parameters)
        } else {
            Tls::Opportunistic(parameters)
        };
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
                .port(config.port)
                .tls(tls)
                .credentials(credentials)
                .build(),
        )
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpTransport {
    async fn send(
        &self,
        config: &TransportConfig,
        email: PreparedEmail,
    ) -> Result<DeliveryReceipt, TransportFailure> {
        let recipient = email.to.clone();
        let (message, message_id) = build_message(email)?;
        let transport = Self::connect(config)?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| smtp_failure(&e))?;

        Ok(DeliveryReceipt {
            message_id,
            accepted: vec![recipient],
            response: format!(
                "{} {}",
                response.code(),
                response.message().collect::<Vec<_>>().join(" ")
            ),
            sent_at: Utc::now(),
        })
    }

    async fn verify(&self, config: &TransportConfig) -> Result<(), TransportFailure> {
        let transport = Self::connect(config)?;
        match transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportFailure::new(
                "SMTP server did not answer the connection test",
            )
            .with_code("connection")),
            Err(e) => Err(smtp_failure(&e)),
        }
    }
}

fn build_message(email: PreparedEmail) -> Result<(Message, String), TransportFailure> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| envelope_failure(format!("Invalid sender `{}`: {}", email.from, e)))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| envelope_failure(format!("Invalid recipient `{}`: {}", email.to, e)))?;
    let message_id = format!("<{}@{}>", Uuid::new_v4(), from.email.domain());

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject)
        .message_id(Some(message_id.clone()));
    let message = match email.html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(email.text, html)),
        None => builder.header(ContentType::TEXT_PLAIN).body(email.text),
    }
    .map_err(|e| envelope_failure(e.to_string()))?;

    Ok((message, message_id))
}

fn envelope_failure(message: String) -> TransportFailure {
    TransportFailure::new(message).with_code("envelope")
}

fn smtp_failure(e: &lettre::transport::smtp::Error) -> TransportFailure {
    let code = if e.is_permanent() {
        "permanent"
    } else if e.is_transient() {
        "transient"
    } else if e.is_response() {
        "response"
    } else if e.is_client() {
        "client"
    } else {
        "connection"
    };

    TransportFailure {
        message: e.to_string(),
        code: Some(code.to_string()),
        command: None,
        response: std::error::Error::source(e).map(|source| source.to_string()),
        response_code: e.status().and_then(|status| status.to_string().parse().ok()),
    }
}
