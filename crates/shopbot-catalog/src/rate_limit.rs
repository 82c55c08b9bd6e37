//! Retry with exponential backoff for the WooCommerce client.
//!
//! Only transient failures (HTTP 429, 5xx and network errors) are retried.
//! Everything else, including 401/403 and malformed bodies, is returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Upper bound on any single backoff sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::RateLimited { .. } | CatalogError::Http(_) => true,
        CatalogError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Computes the sleep before retry number `attempt` (zero-based).
///
/// `backoff_base_secs * 2^attempt` seconds with ±25 % jitter, raised to the
/// server's `Retry-After` hint when one was given, capped at 60 s.
fn backoff_delay(err: &CatalogError, attempt: u32, backoff_base_secs: u64) -> Duration {
    let computed_ms = backoff_base_secs
        .saturating_mul(1_000)
        .saturating_mul(1u64 << attempt.min(20));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered_ms = (computed_ms.min(MAX_DELAY_MS) as f64 * (rand::random::<f64>() * 0.5 + 0.75))
        as u64;

    let hinted_ms = match err {
        CatalogError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1_000),
        _ => 0,
    };

    Duration::from_millis(jittered_ms.max(hinted_ms).min(MAX_DELAY_MS))
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times.
///
/// With `max_retries = 2` the operation runs at most three times. The last
/// error is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                let delay = backoff_delay(&err, attempt, backoff_base_secs);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient catalog error, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
