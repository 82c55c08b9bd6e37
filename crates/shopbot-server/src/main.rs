mod api;
mod middleware;
mod prompt;

use std::sync::Arc;

use shopbot_catalog::{
    CatalogSource, ProductSearch, SnapshotCatalog, WooCommerceCatalog, WooCommerceClient,
};
use shopbot_chatwoot::ChatwootClient;
use shopbot_core::{AppConfig, CatalogSourceKind};
use shopbot_openai::{ChatSettings, OpenAiClient};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::WebhookAuth,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shopbot_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = build_state(&config)?;
    let auth = WebhookAuth::new(config.webhook_token.as_deref());
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        catalog = %config.catalog_source,
        "shopbot server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let catalog: Arc<dyn CatalogSource> = match config.catalog_source {
        CatalogSourceKind::WooCommerce => {
            let creds = config.woocommerce_credentials()?;
            let client = WooCommerceClient::new(
                creds.store_url,
                creds.consumer_key,
                creds.consumer_secret,
                config.http_timeout_secs,
                &config.http_user_agent,
                config.http_max_retries,
                config.http_retry_backoff_base_secs,
            )?;
            Arc::new(WooCommerceCatalog::new(client))
        }
        CatalogSourceKind::Snapshot => {
            let snapshot = SnapshotCatalog::open(&config.snapshot_path)?;
            tracing::info!(
                path = %config.snapshot_path.display(),
                records = snapshot.records().len(),
                "catalog snapshot loaded"
            );
            Arc::new(snapshot)
        }
    };

    let completion = OpenAiClient::new(
        config.require_openai_api_key()?,
        &config.openai_base_url,
        ChatSettings {
            model: config.openai_model.clone(),
            max_tokens: config.openai_max_tokens,
            temperature: config.openai_temperature,
        },
        config.http_timeout_secs,
        &config.http_user_agent,
    )?;

    let replies = ChatwootClient::new(
        &config.chatwoot_base_url,
        config.require_chatwoot_access_token()?,
        config.http_timeout_secs,
        &config.http_user_agent,
    )?;

    Ok(AppState {
        catalog,
        completion: Arc::new(completion),
        replies: Arc::new(replies),
        search: Arc::new(ProductSearch::default().with_priority_brand(&config.priority_brand)),
        shop_name: Arc::from(config.shop_name.as_str()),
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
