use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const WEBHOOK_TOKEN_HEADER: &str = "x-webhook-token";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Shared-secret settings for the webhook routes.
///
/// Chatwoot cannot send custom auth headers from a plain webhook, so the
/// secret is usually appended to the webhook URL as `?token=...`.
#[derive(Clone)]
pub struct WebhookAuth {
    token: Option<Arc<str>>,
}

impl std::fmt::Debug for WebhookAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookAuth")
            .field("enabled", &self.enabled())
            .finish()
    }
}

impl WebhookAuth {
    /// Blank or missing tokens disable the check.
    #[must_use]
    pub fn new(token: Option<&str>) -> Self {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Arc::from);
        if token.is_none() {
            tracing::warn!("SHOPBOT_WEBHOOK_TOKEN not set; webhook accepts unauthenticated requests");
        }
        Self { token }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.token.is_some()
    }

    fn allows(&self, candidate: Option<&str>) -> bool {
        match (&self.token, candidate) {
            (None, _) => true,
            (Some(expected), Some(candidate)) => {
                expected.as_bytes().ct_eq(candidate.as_bytes()).into()
            }
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter shared by every protected route.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

fn middleware_error(status: StatusCode, code: &'static str, message: &'static str) -> Response {
    (
        status,
        Json(MiddlewareErrorBody {
            error: MiddlewareError { code, message },
        }),
    )
        .into_response()
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Middleware rejecting webhook calls without the shared token, when one is
/// configured.
pub async fn require_webhook_token(
    State(auth): State<WebhookAuth>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled() {
        return next.run(req).await;
    }

    let from_query = Query::<TokenQuery>::try_from_uri(req.uri())
        .map(|Query(q)| q.token)
        .unwrap_or_default();
    let candidate = from_query.or_else(|| extract_header_token(req.headers()));

    if auth.allows(candidate.as_deref()) {
        next.run(req).await
    } else {
        tracing::warn!(path = %req.uri().path(), "webhook call rejected: bad or missing token");
        middleware_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid webhook token",
        )
    }
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        return middleware_error(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded",
        );
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

fn extract_header_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(WEBHOOK_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
