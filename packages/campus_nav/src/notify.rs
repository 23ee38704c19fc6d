//! This module focuses on sending route directions to the user. The transport
//! itself is hidden behind the TextSender trait, so that the rest of the
//! service never needs to know how (or whether) messages are delivered.

pub mod message;
pub mod twilio;

/// Capability to deliver a plain text message to a recipient. Returns true
/// if the message was accepted for delivery. No retries are attempted
pub trait TextSender: Send + Sync {
    fn send_text(&self, recipient: &str, body: &str) -> bool;
}
