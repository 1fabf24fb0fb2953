//! Session bootstrap: landing page → bearer token → default headers.
//!
//! The reviews API only answers requests carrying the bearer token that the
//! storefront embeds in its landing page, inside a URL-encoded JSON blob in
//! a `<meta>` tag:
//!
//! ```html
//! <meta name="web-experience-app/config/environment" content="%7B%22MEDIA_API%22%3A%7B%22token%22%3A%22eyJhbGciOi...%22%7D%7D">
//! ```
//!
//! The matching strategy lives behind [`TokenExtractor`] so it can change
//! without touching the pagination engine.

use std::fmt;
use std::sync::LazyLock;

use appreviews_core::Target;
use rand::seq::IndexedRandom;
use regex::Regex;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONNECTION, CONTENT_TYPE, ORIGIN, REFERER,
    USER_AGENT,
};
use reqwest::Url;

use crate::client::{Endpoints, ReviewsClient};
use crate::error::BootstrapError;

static CONFIG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<meta.+web-experience-app/config/environment")
        .expect("valid config tag regex")
});

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"token%22%3A%22(.+?)%22").expect("valid token regex"));

/// User agents rotated per session. Cosmetic only.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1; .NET CLR 1.1.4322)",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1)",
];

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Bearer credential scraped from the landing page.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([redacted])")
    }
}

/// Strategy for pulling the bearer token out of landing page HTML.
pub trait TokenExtractor: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`BootstrapError`] if no token can be found.
    fn extract_token(&self, html: &str) -> Result<BearerToken, BootstrapError>;
}

/// Scans line by line for the web-experience config `<meta>` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaTagTokenExtractor;

impl TokenExtractor for MetaTagTokenExtractor {
    fn extract_token(&self, html: &str) -> Result<BearerToken, BootstrapError> {
        let tag = html
            .lines()
            .find(|line| CONFIG_TAG.is_match(line))
            .ok_or(BootstrapError::ConfigTagMissing)?;
        TOKEN
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| BearerToken::new(m.as_str()))
            .ok_or(BootstrapError::TokenMissing)
    }
}

/// Extracts the bearer token with the default [`MetaTagTokenExtractor`].
///
/// # Errors
///
/// - [`BootstrapError::ConfigTagMissing`] if no line holds the config tag.
/// - [`BootstrapError::TokenMissing`] if the tag holds no token.
pub fn extract_token(html: &str) -> Result<BearerToken, BootstrapError> {
    MetaTagTokenExtractor.extract_token(html)
}

/// Everything needed to call the reviews endpoint for one target.
///
/// Built once per scraper; the token is never refreshed, so a very long run
/// can outlive it.
#[derive(Debug, Clone)]
pub struct Session {
    landing_url: Url,
    request_url: Url,
    token: BearerToken,
    headers: HeaderMap,
}

impl Session {
    /// Fetches the landing page and builds a session with the default extractor.
    ///
    /// # Errors
    ///
    /// See [`Session::bootstrap_with`].
    pub async fn bootstrap(
        client: &ReviewsClient,
        target: &Target,
        endpoints: &Endpoints,
    ) -> Result<Self, BootstrapError> {
        Self::bootstrap_with(client, target, endpoints, &MetaTagTokenExtractor).await
    }

    /// Fetches the landing page once and builds a session using `extractor`.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::LandingPage`] if the page cannot be fetched.
    /// - [`BootstrapError::ConfigTagMissing`] / [`BootstrapError::TokenMissing`]
    ///   (or whatever `extractor` returns) if no token is found.
    /// - [`BootstrapError::InvalidUrl`] / [`BootstrapError::InvalidHeader`] if
    ///   the target cannot be turned into a valid request.
    pub async fn bootstrap_with(
        client: &ReviewsClient,
        target: &Target,
        endpoints: &Endpoints,
        extractor: &dyn TokenExtractor,
    ) -> Result<Self, BootstrapError> {
        let landing_url = endpoints.landing_url(target)?;
        let html = client
            .get_text(landing_url.clone(), &[])
            .await
            .map_err(|source| BootstrapError::LandingPage {
                url: landing_url.to_string(),
                source,
            })?;
        let token = extractor.extract_token(&html)?;
        Self::from_token(target, endpoints, token)
    }

    /// Builds a session from an already known token. Makes no request.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidUrl`] or [`BootstrapError::InvalidHeader`]
    /// if the target or token cannot form a valid request.
    pub fn from_token(
        target: &Target,
        endpoints: &Endpoints,
        token: BearerToken,
    ) -> Result<Self, BootstrapError> {
        let landing_url = endpoints.landing_url(target)?;
        let request_url = endpoints.request_url(target)?;
        let headers = default_headers(&token, &endpoints.landing_origin(), &landing_url)?;
        Ok(Self {
            landing_url,
            request_url,
            token,
            headers,
        })
    }

    #[must_use]
    pub fn landing_url(&self) -> &Url {
        &self.landing_url
    }

    #[must_use]
    pub fn request_url(&self) -> &Url {
        &self.request_url
    }

    #[must_use]
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn default_headers(
    token: &BearerToken,
    origin: &str,
    landing_url: &Url,
) -> Result<HeaderMap, BootstrapError> {
    let value = |name: &'static str, raw: &str| {
        HeaderValue::from_str(raw).map_err(|_| BootstrapError::InvalidHeader { name })
    };

    let mut authorization = value("authorization", &token.authorization())?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    headers.insert(ORIGIN, value("origin", origin)?);
    headers.insert(REFERER, value("referer", landing_url.as_str())?);
    headers.insert(USER_AGENT, HeaderValue::from_static(pick_user_agent()));
    Ok(headers)
}

fn pick_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
