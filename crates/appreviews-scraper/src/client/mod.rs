//! HTTP client for the storefront landing pages and reviews endpoint.

mod endpoints;

use std::time::Duration;

use appreviews_core::ScraperConfig;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::ReviewsPage;

pub use endpoints::Endpoints;

/// Thin wrapper around `reqwest::Client` carrying the retry policy.
///
/// 429 and 404 responses from the reviews endpoint are retried with
/// exponential backoff up to `max_retries` additional attempts. The landing
/// page is fetched once with no retry.
pub struct ReviewsClient {
    pub(crate) client: Client,
    /// Additional attempts after the first failure.
    pub(crate) max_retries: u32,
    /// Base delay in seconds: the n-th retry waits `backoff_base_secs * 2^(n-1)`.
    pub(crate) backoff_base_secs: u64,
}

impl ReviewsClient {
    /// Creates a client with the configured timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        })
    }

    /// GETs `url` and returns the body as text. No retry.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest::Error` on network failure or a non-2xx status.
    pub async fn get_text(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<String, reqwest::Error> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).query(query).send().await?;
        response.error_for_status()?.text().await
    }

    /// Fetches one page of reviews, retrying 429 and 404.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`]: HTTP 404 after all retries.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network or TLS failure.
    /// - [`ScraperError::Deserialize`]: the body is not a reviews page.
    pub async fn fetch_reviews_page(
        &self,
        url: &Url,
        headers: &HeaderMap,
        params: &[(&str, String)],
    ) -> Result<ReviewsPage, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            tracing::debug!(%url, ?params, "GET reviews page");
            let response = self
                .client
                .get(url.clone())
                .headers(headers.clone())
                .query(params)
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(ScraperError::RateLimited {
                    url: url.to_string(),
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ScraperError::NotFound {
                    url: url.to_string(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<ReviewsPage>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("reviews page from {url}"),
                source: e,
            })
        })
        .await
    }
}
