use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the service reads its product catalog from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSourceKind {
    /// Live WooCommerce REST API, queried per message.
    WooCommerce,
    /// Local JSON snapshot, read once at startup.
    Snapshot,
}

impl std::fmt::Display for CatalogSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSourceKind::WooCommerce => write!(f, "woocommerce"),
            CatalogSourceKind::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// WooCommerce connection settings, borrowed from an [`AppConfig`].
#[derive(Clone, Copy)]
pub struct WooCommerceCredentials<'a> {
    pub store_url: &'a str,
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shop_name: String,
    pub priority_brand: String,
    pub catalog_source: CatalogSourceKind,
    pub snapshot_path: PathBuf,
    pub webhook_token: Option<String>,
    pub wc_store_url: Option<String>,
    pub wc_consumer_key: Option<String>,
    pub wc_consumer_secret: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_max_tokens: u32,
    pub openai_temperature: f32,
    pub chatwoot_base_url: String,
    pub chatwoot_access_token: Option<String>,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_secs: u64,
}

impl AppConfig {
    /// Returns the WooCommerce connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first unset variable.
    pub fn woocommerce_credentials(&self) -> Result<WooCommerceCredentials<'_>, ConfigError> {
        Ok(WooCommerceCredentials {
            store_url: required(self.wc_store_url.as_deref(), "WC_STORE_URL")?,
            consumer_key: required(self.wc_consumer_key.as_deref(), "WC_CONSUMER_KEY")?,
            consumer_secret: required(self.wc_consumer_secret.as_deref(), "WC_CONSUMER_SECRET")?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `OPENAI_API_KEY` is unset.
    pub fn require_openai_api_key(&self) -> Result<&str, ConfigError> {
        required(self.openai_api_key.as_deref(), "OPENAI_API_KEY")
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `CHATWOOT_ACCESS_TOKEN` is unset.
    pub fn require_chatwoot_access_token(&self) -> Result<&str, ConfigError> {
        required(
            self.chatwoot_access_token.as_deref(),
            "CHATWOOT_ACCESS_TOKEN",
        )
    }
}

fn required<'a>(value: Option<&'a str>, var: &str) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shop_name", &self.shop_name)
            .field("priority_brand", &self.priority_brand)
            .field("catalog_source", &self.catalog_source)
            .field("snapshot_path", &self.snapshot_path)
            .field("webhook_token", &redact(&self.webhook_token))
            .field("wc_store_url", &self.wc_store_url)
            .field("wc_consumer_key", &redact(&self.wc_consumer_key))
            .field("wc_consumer_secret", &redact(&self.wc_consumer_secret))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("openai_max_tokens", &self.openai_max_tokens)
            .field("openai_temperature", &self.openai_temperature)
            .field("chatwoot_base_url", &self.chatwoot_base_url)
            .field("chatwoot_access_token", &redact(&self.chatwoot_access_token))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_secs",
                &self.http_retry_backoff_base_secs,
            )
            .finish()
    }
}
