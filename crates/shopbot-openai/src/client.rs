//! HTTP client for the `/chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::OpenAiError;
use crate::types::{ChatRequest, ChatResponse, Role, WireMessage};

/// Longest error body kept in [`OpenAiError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Anything that turns a system prompt and a user message into reply text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see [`OpenAiClient::complete`].
    async fn complete(&self, system_prompt: &str, user_message: &str)
        -> Result<String, OpenAiError>;
}

/// Model parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Client for an OpenAI-compatible chat completion API.
///
/// Use a custom `base_url` to target a compatible gateway or a mock server
/// in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    settings: ChatSettings,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client for `{base_url}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`OpenAiError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        base_url: &str,
        settings: ChatSettings,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OpenAiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint).map_err(|e| OpenAiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            settings,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Sends one system + user exchange and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// - [`OpenAiError::Http`] on network failure.
    /// - [`OpenAiError::Api`] on a non-2xx status; `body` holds the start of
    ///   the response body.
    /// - [`OpenAiError::Deserialize`] if the body is not a completion object.
    /// - [`OpenAiError::EmptyCompletion`] if no text came back.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, OpenAiError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: [
                WireMessage {
                    role: Role::System,
                    content: system_prompt,
                },
                WireMessage {
                    role: Role::User,
                    content: user_message,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "completion API request failed");
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| OpenAiError::Deserialize {
                context: format!("chat completion from model {}", self.settings.model),
                source: e,
            })?;

        let text = parsed.into_first_text().ok_or(OpenAiError::EmptyCompletion)?;
        tracing::debug!(
            model = %self.settings.model,
            chars = text.chars().count(),
            "completion received"
        );
        Ok(text)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, OpenAiError> {
        OpenAiClient::complete(self, system_prompt, user_message).await
    }
}
