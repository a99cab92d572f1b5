//! src/email_client.rs
use crate::configuration::{SmtpSettings, TransportConfig};
use crate::domain::{DeliveryReceipt, OutboundMessage};
use crate::routes::error_chain_fmt;
use crate::smtp_transport::SmtpTransport;
use std::sync::Arc;

/// A message with its sender already resolved, as handed to a [`MailTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// The wire side of the mail adapter.
///
/// Implementations make exactly one attempt per call.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync + 'static {
    async fn send(
        &self,
        config: &TransportConfig,
        email: PreparedEmail,
    ) -> Result<DeliveryReceipt, TransportFailure>;

    async fn verify(&self, config: &TransportConfig) -> Result<(), TransportFailure>;
}

/// Diagnostics reported by the transport when a send or a handshake fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportFailure {
    pub message: String,
    pub code: Option<String>,
    pub command: Option<String>,
    pub response: Option<String>,
    pub response_code: Option<u16>,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[derive(thiserror::Error)]
pub enum MailError {
    #[error("{0}")]
    Configuration(String),
    #[error(transparent)]
    Transport(#[from] TransportFailure),
}

impl std::fmt::Debug for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl MailError {
    /// Flatten into the diagnostic fields exposed by `/_debug/smtp`.
    pub fn diagnostics(&self) -> TransportFailure {
        match self {
            MailError::Configuration(message) => {
                TransportFailure::new(message.clone()).with_code("configuration")
            }
            MailError::Transport(failure) => failure.clone(),
        }
    }
}

#[derive(Clone)]
pub struct EmailClient {
    settings: SmtpSettings,
    transport: Arc<dyn MailTransport>,
}

impl EmailClient {
    pub fn new(settings: SmtpSettings, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Adapter backed by a real SMTP connection per call.
    pub fn smtp(settings: SmtpSettings) -> Self {
        Self::new(settings, Arc::new(SmtpTransport))
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip(self, message),
        fields(recipient = %message.to, subject = %message.subject)
    )]
    pub async fn send_email(&self, message: OutboundMessage) -> Result<DeliveryReceipt, MailError> {
        let config = self.settings.transport_config()?;

        if let Some(requested) = message.from.as_deref() {
            if requested != config.from {
                tracing::debug!(
                    requested_sender = %requested,
                    "Ignoring caller supplied sender, SMTP_FROM is used instead"
                );
            }
        }

        let email = PreparedEmail {
            from: config.from.clone(),
            to: message.to,
            subject: message.subject,
            text: message.text,
            html: message.html,
        };
        let receipt = self.transport.send(&config, email).await.map_err(|e| {
            tracing::error!(error.code = ?e.code, "Failed to send email: {}", e);
            e
        })?;
        tracing::info!(message_id = %receipt.message_id, "Email accepted by the SMTP server");
        Ok(receipt)
    }

    #[tracing::instrument(name = "Verifying the SMTP connection", skip(self))]
    pub async fn verify(&self) -> Result<(), MailError> {
        let config = self.settings.transport_config()?;
        self.transport.verify(&config).await?;
        Ok(())
    }
}
