use thiserror::Error;

/// Failures that prevent a session from being established.
///
/// Bootstrap errors are fatal: without a bearer token the reviews API
/// cannot be called, so nothing is retried.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load landing page {url}: {source}")]
    LandingPage {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("landing page has no web-experience config tag")]
    ConfigTagMissing,

    #[error("config tag found but it carries no token")]
    TokenMissing,

    #[error("invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("session bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("invalid target: {0}")]
    Target(#[from] appreviews_core::TargetError),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid review date \"{value}\": {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("next page link has no offset: {next}")]
    MalformedNext { next: String },

    #[error("no catalogue id found in search results for \"{query}\"")]
    IdNotFound { query: String },
}
