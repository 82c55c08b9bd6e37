use axum::{extract::State, Extension, Json};
use serde::Serialize;
use shopbot_catalog::{
    extract_product_intent, load_or_empty, render_product_summary, CatalogQuery,
};
use shopbot_chatwoot::{SkipReason, WebhookEvent};

use super::{ApiError, AppState, INTENT_CATALOG_LIMIT, OVERVIEW_CATALOG_LIMIT};
use crate::middleware::RequestId;
use crate::prompt::build_system_prompt;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum WebhookResponse {
    Skipped {
        success: bool,
        skipped: bool,
        reason: SkipReason,
    },
    Replied {
        success: bool,
        message_sent: String,
        original_message: String,
        product_data: ProductData,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct ProductData {
    intent_detected: bool,
    search_terms: Vec<String>,
    products_found: usize,
    catalog_available: bool,
}

/// Answers one Chatwoot webhook event.
///
/// Events that are not new public contact messages are acknowledged with
/// `skipped: true`. Catalog failures degrade to an empty product list;
/// completion or delivery failures surface as `502 upstream_error`.
pub(super) async fn chatwoot_webhook(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(event): Json<WebhookEvent>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let message = match event.eligibility() {
        Ok(message) => message,
        Err(reason) => {
            tracing::debug!(%reason, "webhook event skipped");
            return Ok(Json(WebhookResponse::Skipped {
                success: true,
                skipped: true,
                reason,
            }));
        }
    };

    tracing::info!(
        account_id = message.account_id,
        conversation_id = message.conversation_id,
        inbox_id = ?message.inbox_id,
        "processing customer message"
    );

    let intent = extract_product_intent(&message.content);
    let query = if intent.has_product_intent {
        CatalogQuery::new(INTENT_CATALOG_LIMIT).with_search(intent.search_query.clone())
    } else {
        CatalogQuery::new(OVERVIEW_CATALOG_LIMIT)
    };
    let records = load_or_empty(state.catalog.as_ref(), &query).await;

    let search_text = if intent.has_product_intent {
        intent.search_query.as_str()
    } else {
        message.content.as_str()
    };
    let products = state.search.search(search_text, &records);
    tracing::info!(
        intent = intent.has_product_intent,
        loaded = records.len(),
        matched = products.len(),
        "catalog searched"
    );

    let summary = render_product_summary(&products);
    let system_prompt = build_system_prompt(
        &state.shop_name,
        &summary,
        products.len(),
        intent.has_product_intent,
    );

    let reply = state
        .completion
        .complete(&system_prompt, &message.content)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "completion request failed");
            ApiError::new(req_id.0.clone(), "upstream_error", "completion request failed")
        })?;

    state
        .replies
        .send_reply(message.account_id, message.conversation_id, &reply)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                conversation_id = message.conversation_id,
                "reply delivery failed"
            );
            ApiError::new(req_id.0.clone(), "upstream_error", "reply delivery failed")
        })?;

    Ok(Json(WebhookResponse::Replied {
        success: true,
        message_sent: reply,
        original_message: message.content,
        product_data: ProductData {
            intent_detected: intent.has_product_intent,
            search_terms: intent.search_terms,
            products_found: products.len(),
            catalog_available: !records.is_empty(),
        },
    }))
}
