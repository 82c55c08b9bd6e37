use thiserror::Error;

/// Errors returned by the Chatwoot API client.
#[derive(Debug, Error)]
pub enum ChatwootError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Chatwoot answered with a non-2xx status.
    #[error("Chatwoot API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Chatwoot base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
