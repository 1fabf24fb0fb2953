//! Retry with exponential back-off for the reviews endpoint.
//!
//! The storefront answers bursts with 429 and occasionally serves a
//! transient 404 for a page that exists. Only those two are retried; every
//! other failure is returned to the caller immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` is a transient status worth retrying.
///
/// Retriable errors:
/// - [`ScraperError::RateLimited`]: HTTP 429.
/// - [`ScraperError::NotFound`]: HTTP 404, which the reviews API emits
///   spuriously under load.
///
/// Everything else, network failures included, is propagated immediately.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. } | ScraperError::NotFound { .. }
    )
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// The operation is attempted at most `max_retries + 1` times. Before the
/// n-th retry the function sleeps `backoff_base_secs * 2^(n-1)` seconds.
///
/// | Attempt | Sleep before it (`backoff_base_secs = 3`) |
/// |---------|-------------------------------------------|
/// | 1       | none                                      |
/// | 2       | 3 × 2^0 = 3 s                             |
/// | 3       | 3 × 2^1 = 6 s                             |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        attempt += 1;
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient reviews error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
    }
}
