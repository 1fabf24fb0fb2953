//! Catalogue id lookup for targets constructed by name only.
//!
//! This is best-effort: the first search hit that looks like a landing page
//! wins, which may not be the entry the caller had in mind.

use std::future::Future;

use appreviews_core::{ContentKind, Target};
use regex::Regex;
use reqwest::Url;

use crate::client::{Endpoints, ReviewsClient};
use crate::error::{BootstrapError, ScraperError};

const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Maps a slug to a numeric catalogue id.
pub trait IdResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`ScraperError`] if the lookup fails or finds nothing.
    fn resolve_id(
        &self,
        kind: ContentKind,
        endpoints: &Endpoints,
        slug: &str,
    ) -> impl Future<Output = Result<u64, ScraperError>> + Send;
}

/// Resolves ids by scanning a web search results page for landing URLs.
#[derive(Debug, Clone)]
pub struct WebSearchResolver {
    client: reqwest::Client,
    search_url: Url,
}

impl WebSearchResolver {
    /// Uses the public web search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Bootstrap`] if the built-in search URL fails to parse.
    pub fn new(client: &ReviewsClient) -> Result<Self, ScraperError> {
        Self::with_search_url(client, DEFAULT_SEARCH_URL)
    }

    /// Uses a custom search endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Bootstrap`] if `search_url` is not a valid URL.
    pub fn with_search_url(client: &ReviewsClient, search_url: &str) -> Result<Self, ScraperError> {
        let search_url = Url::parse(search_url).map_err(|e| BootstrapError::InvalidUrl {
            url: search_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: client.client.clone(),
            search_url,
        })
    }
}

impl IdResolver for WebSearchResolver {
    async fn resolve_id(
        &self,
        kind: ContentKind,
        endpoints: &Endpoints,
        slug: &str,
    ) -> Result<u64, ScraperError> {
        let query = format!("{} {slug}", kind.search_prefix());
        tracing::info!(%query, "searching for catalogue id");

        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[("q", query.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        find_catalogue_id(&body, endpoints.landing_base()).ok_or(ScraperError::IdNotFound { query })
    }
}

/// Finds the first `<landing_base>/<cc>/<...>/id<digits>` link in `body`.
#[must_use]
pub fn find_catalogue_id(body: &str, landing_base: &str) -> Option<u64> {
    let pattern = format!(r"{}/[a-z]{{2}}/.+?/id([0-9]+)", regex::escape(landing_base));
    let re = Regex::new(&pattern).ok()?;
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Builds a [`Target`] whose id is looked up through `resolver`.
///
/// The country and name are validated first, so an invalid target never
/// reaches the resolver.
///
/// # Errors
///
/// [`ScraperError::Target`] if the country or name is invalid, otherwise
/// the resolver's error.
pub async fn resolve_target<R: IdResolver>(
    resolver: &R,
    endpoints: &Endpoints,
    kind: ContentKind,
    country: &str,
    name: &str,
) -> Result<Target, ScraperError> {
    let target = Target::new(kind, country, name, 0)?;
    let id = resolver.resolve_id(kind, endpoints, target.slug()).await?;
    Ok(target.with_id(id))
}
