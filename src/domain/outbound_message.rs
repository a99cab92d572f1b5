/// A single email to hand to the transport.
///
/// Recipient and subject are validated by the transport when the message is
/// built, not here.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    /// Ignored on send: the configured `SMTP_FROM` address is always used.
    pub from: Option<String>,
}

impl OutboundMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}
