//! Chatwoot integration: inbound webhook payloads and the outbound reply API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatwootClient, ReplySender, SentMessage};
pub use error::ChatwootError;
pub use types::{EligibleMessage, SkipReason, WebhookEvent};
