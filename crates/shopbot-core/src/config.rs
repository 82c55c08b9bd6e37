use crate::app_config::{AppConfig, CatalogSourceKind, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are read as optional values here; the binary that needs them
/// enforces presence through the `AppConfig::require_*` helpers.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHOPBOT_ENV", "development"));
    let bind_addr = parse_addr("SHOPBOT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPBOT_LOG_LEVEL", "info");
    let shop_name = or_default("SHOPBOT_SHOP_NAME", "our shop");
    let priority_brand = or_default("SHOPBOT_PRIORITY_BRAND", "medi pharma");

    let catalog_source = parse_catalog_source(&or_default("SHOPBOT_CATALOG_SOURCE", "woocommerce"))
        .ok_or_else(|| {
            invalid(
                "SHOPBOT_CATALOG_SOURCE",
                "expected \"woocommerce\" or \"snapshot\"".to_string(),
            )
        })?;
    let snapshot_path = PathBuf::from(or_default(
        "SHOPBOT_CATALOG_SNAPSHOT_PATH",
        "./data/products.json",
    ));
    let webhook_token = optional("SHOPBOT_WEBHOOK_TOKEN");

    let wc_store_url = optional("WC_STORE_URL");
    let wc_consumer_key = optional("WC_CONSUMER_KEY");
    let wc_consumer_secret = optional("WC_CONSUMER_SECRET");

    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_base_url = or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o");
    let openai_max_tokens = parse_u32("OPENAI_MAX_TOKENS", "600")?;
    let openai_temperature = parse_f32("OPENAI_TEMPERATURE", "0.2")?;
    if !(0.0..=2.0).contains(&openai_temperature) {
        return Err(invalid(
            "OPENAI_TEMPERATURE",
            format!("{openai_temperature} is outside 0.0..=2.0"),
        ));
    }

    let chatwoot_base_url = or_default("CHATWOOT_BASE_URL", "https://app.chatwoot.com");
    let chatwoot_access_token = optional("CHATWOOT_ACCESS_TOKEN");

    let http_timeout_secs = parse_u64("SHOPBOT_HTTP_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default(
        "SHOPBOT_HTTP_USER_AGENT",
        "shopbot/0.1 (support-assistant)",
    );
    let http_max_retries = parse_u32("SHOPBOT_HTTP_MAX_RETRIES", "2")?;
    let http_retry_backoff_base_secs = parse_u64("SHOPBOT_HTTP_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shop_name,
        priority_brand,
        catalog_source,
        snapshot_path,
        webhook_token,
        wc_store_url,
        wc_consumer_key,
        wc_consumer_secret,
        openai_api_key,
        openai_base_url,
        openai_model,
        openai_max_tokens,
        openai_temperature,
        chatwoot_base_url,
        chatwoot_access_token,
        http_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_catalog_source(s: &str) -> Option<CatalogSourceKind> {
    match s.trim().to_ascii_lowercase().as_str() {
        "woocommerce" | "wc" => Some(CatalogSourceKind::WooCommerce),
        "snapshot" | "file" => Some(CatalogSourceKind::Snapshot),
        _ => None,
    }
}
