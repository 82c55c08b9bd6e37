//! HTTP client for posting replies through the Chatwoot application API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ChatwootError;

const ACCESS_TOKEN_HEADER: &str = "api_access_token";
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Anything that can deliver a reply into a conversation.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Posts `content` as an outgoing message.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see [`ChatwootClient::send_reply`].
    async fn send_reply(
        &self,
        account_id: u64,
        conversation_id: u64,
        content: &str,
    ) -> Result<SentMessage, ChatwootError>;
}

/// The message Chatwoot created for a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SentMessage {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub conversation_id: Option<u64>,
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    content: &'a str,
    message_type: &'static str,
}

/// Client for one Chatwoot installation.
pub struct ChatwootClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl std::fmt::Debug for ChatwootClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatwootClient")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl ChatwootClient {
    /// Creates a client authenticating with a user or bot access token.
    ///
    /// # Errors
    ///
    /// Returns [`ChatwootError::InvalidBaseUrl`] if `base_url` does not
    /// parse, or [`ChatwootError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn new(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ChatwootError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ChatwootError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
        })
    }

    fn messages_url(&self, account_id: u64, conversation_id: u64) -> Result<Url, ChatwootError> {
        self.base_url
            .join(&format!(
                "api/v1/accounts/{account_id}/conversations/{conversation_id}/messages"
            ))
            .map_err(|e| ChatwootError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Posts `content` as an outgoing message in the conversation.
    ///
    /// # Errors
    ///
    /// - [`ChatwootError::Http`] on network failure.
    /// - [`ChatwootError::Api`] on a non-2xx status.
    /// - [`ChatwootError::Deserialize`] if the success body is not JSON.
    pub async fn send_reply(
        &self,
        account_id: u64,
        conversation_id: u64,
        content: &str,
    ) -> Result<SentMessage, ChatwootError> {
        let url = self.messages_url(account_id, conversation_id)?;
        let response = self
            .client
            .post(url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&OutgoingMessage {
                content,
                message_type: "outgoing",
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                account_id,
                conversation_id,
                "Chatwoot rejected reply"
            );
            return Err(ChatwootError::Api {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let sent: SentMessage =
            serde_json::from_str(&body).map_err(|e| ChatwootError::Deserialize {
                context: format!("reply in conversation {conversation_id}"),
                source: e,
            })?;
        tracing::info!(
            account_id,
            conversation_id,
            message_id = ?sent.id,
            "reply posted to Chatwoot"
        );
        Ok(sent)
    }
}

#[async_trait]
impl ReplySender for ChatwootClient {
    async fn send_reply(
        &self,
        account_id: u64,
        conversation_id: u64,
        content: &str,
    ) -> Result<SentMessage, ChatwootError> {
        ChatwootClient::send_reply(self, account_id, conversation_id, content).await
    }
}
