//! The review scraper: one bootstrapped session plus a resumable cursor.

mod retrieve;

use std::fmt;
use std::time::Duration;

use appreviews_core::{Review, ScraperConfig, Target};

use crate::bootstrap::Session;
use crate::client::{Endpoints, ReviewsClient};
use crate::error::ScraperError;
use crate::heartbeat::Heartbeat;
use crate::pagination::Cursor;

pub use retrieve::{RetrievalOutcome, RetrieveOptions, StopReason};

/// Pulls reviews for a single [`Target`].
///
/// The scraper owns its cursor and accumulator. Every call to
/// [`ReviewScraper::retrieve`] continues where the previous one stopped and
/// appends to the same list, so reviews can be pulled incrementally. The
/// session token is fetched once at construction and never refreshed.
pub struct ReviewScraper {
    client: ReviewsClient,
    target: Target,
    session: Session,
    config: ScraperConfig,
    cursor: Cursor,
    reviews: Vec<Review>,
    heartbeat: Heartbeat,
}

impl ReviewScraper {
    /// Bootstraps a session against the production storefront.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built, or
    /// [`ScraperError::Bootstrap`] if no session can be established.
    pub async fn new(target: Target, config: ScraperConfig) -> Result<Self, ScraperError> {
        let endpoints = Endpoints::for_kind(target.kind())?;
        Self::with_endpoints(target, &endpoints, config).await
    }

    /// Bootstraps a session against custom endpoints.
    ///
    /// # Errors
    ///
    /// Same as [`ReviewScraper::new`].
    pub async fn with_endpoints(
        target: Target,
        endpoints: &Endpoints,
        config: ScraperConfig,
    ) -> Result<Self, ScraperError> {
        let client = ReviewsClient::new(&config)?;
        let session = Session::bootstrap(&client, &target, endpoints).await?;
        Ok(Self::from_session(client, target, session, config))
    }

    /// Wraps an already established session. Makes no request.
    #[must_use]
    pub fn from_session(
        client: ReviewsClient,
        target: Target,
        session: Session,
        config: ScraperConfig,
    ) -> Self {
        let heartbeat = Heartbeat::new(Duration::from_secs(config.heartbeat_interval_secs));
        tracing::info!(entry = %target, "initialised review scraper");
        tracing::info!(url = %session.landing_url(), "ready to fetch reviews");
        Self {
            client,
            target,
            session,
            config,
            cursor: Cursor::default(),
            reviews: Vec::new(),
            heartbeat,
        }
    }

    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Every review appended so far, in API order.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn reviews_count(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn into_reviews(self) -> Vec<Review> {
        self.reviews
    }

    fn log_status(&self, fetched: usize) {
        tracing::info!(
            id = self.target.id(),
            fetched,
            total = self.reviews.len(),
            "fetched {fetched} reviews ({} fetched in total)",
            self.reviews.len()
        );
    }
}

impl fmt::Display for ReviewScraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} | {}", "Country", self.target.country())?;
        writeln!(f, "{:>12} | {}", "Name", self.target.slug())?;
        writeln!(f, "{:>12} | {}", "ID", self.target.id())?;
        writeln!(f, "{:>12} | {}", "URL", self.session.landing_url())?;
        write!(f, "{:>12} | {}", "Review count", self.reviews.len())
    }
}
