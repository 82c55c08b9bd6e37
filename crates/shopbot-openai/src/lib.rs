//! Client for OpenAI-compatible chat completion APIs.
//!
//! Only the single-turn `system + user → assistant` exchange is modelled.

pub mod client;
pub mod error;
pub(crate) mod types;

pub use client::{ChatSettings, CompletionClient, OpenAiClient};
pub use error::OpenAiError;
