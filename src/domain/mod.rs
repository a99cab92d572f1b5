mod delivery_receipt;
mod outbound_message;

pub use delivery_receipt::DeliveryReceipt;
pub use outbound_message::OutboundMessage;
