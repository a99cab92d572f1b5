use chrono::{DateTime, Utc};

/// What the SMTP server told us after accepting a message.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub accepted: Vec<String>,
    /// Final server reply, e.g. `250 2.0.0 Ok: queued`.
    pub response: String,
    pub sent_at: DateTime<Utc>,
}
