//! The pagination loop behind [`ReviewScraper::retrieve`].

use std::future::Future;
use std::time::Duration;

use appreviews_core::Review;
use chrono::{DateTime, Utc};

use crate::error::ScraperError;
use crate::normalize::normalize_review;
use crate::pagination::Cursor;

use super::ReviewScraper;

/// Per-call knobs for [`ReviewScraper::retrieve`].
#[derive(Debug, Clone, Default)]
pub struct RetrieveOptions {
    /// Stop once at least this many new reviews were appended by this call.
    /// Pages are taken whole, so the call may overshoot up to a page.
    pub limit: Option<usize>,
    /// Skip reviews dated strictly before this instant. Skipped reviews do
    /// not count toward `limit`.
    pub after: Option<DateTime<Utc>>,
    /// Pause between pages. Not applied after the last page.
    pub delay: Option<Duration>,
}

impl RetrieveOptions {
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Why a retrieval call stopped.
#[derive(Debug)]
pub enum StopReason {
    /// The listing has no further pages.
    Exhausted,
    /// The call appended at least `limit` reviews.
    LimitReached,
    /// The shutdown signal fired.
    Interrupted,
    /// A page could not be fetched or parsed. Earlier pages are kept.
    Failed(ScraperError),
}

/// Result of one [`ReviewScraper::retrieve`] call.
///
/// Retrieval never discards progress: whatever was appended before a
/// failure or interrupt stays in the scraper.
#[derive(Debug)]
pub struct RetrievalOutcome {
    /// Reviews appended by this call.
    pub fetched: usize,
    /// Reviews held by the scraper after this call.
    pub total: usize,
    pub stop: StopReason,
}

impl RetrievalOutcome {
    /// `true` unless the call ended on an error or interrupt.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted | StopReason::LimitReached)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ScraperError> {
        match &self.stop {
            StopReason::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl ReviewScraper {
    /// Pulls pages until the listing is exhausted, `opts.limit` is met, or an
    /// error occurs.
    ///
    /// Installs no signal handler. Use [`ReviewScraper::retrieve_until`] to
    /// make the call interruptible.
    ///
    /// Never returns an error; inspect [`RetrievalOutcome::stop`].
    pub async fn retrieve(&mut self, opts: RetrieveOptions) -> RetrievalOutcome {
        self.retrieve_until(opts, std::future::pending::<()>()).await
    }

    /// Like [`ReviewScraper::retrieve`] but stops as
    /// [`StopReason::Interrupted`] once `shutdown` completes. Its output is
    /// ignored, so a binary can pass `tokio::signal::ctrl_c()` directly.
    ///
    /// Cancellation only lands while waiting on the network or a delay, so
    /// the cursor and the accumulated reviews always agree.
    pub async fn retrieve_until<S>(
        &mut self,
        opts: RetrieveOptions,
        shutdown: S,
    ) -> RetrievalOutcome
    where
        S: Future,
    {
        tokio::pin!(shutdown);
        self.heartbeat.reset();
        let mut fetched = 0usize;

        let stop = tokio::select! {
            biased;
            _ = &mut shutdown => StopReason::Interrupted,
            stop = self.pump(&opts, &mut fetched) => stop,
        };
        if matches!(stop, StopReason::Interrupted) {
            tracing::error!(id = self.target.id(), "interrupted");
        }

        self.log_status(fetched);
        RetrievalOutcome {
            fetched,
            total: self.reviews.len(),
            stop,
        }
    }

    async fn pump(&mut self, opts: &RetrieveOptions, fetched: &mut usize) -> StopReason {
        match self.pump_pages(opts, fetched).await {
            Ok(stop) => stop,
            Err(err) => {
                tracing::error!(id = self.target.id(), error = %err, "something went wrong");
                StopReason::Failed(err)
            }
        }
    }

    async fn pump_pages(
        &mut self,
        opts: &RetrieveOptions,
        fetched: &mut usize,
    ) -> Result<StopReason, ScraperError> {
        loop {
            let Cursor::Offset(offset) = self.cursor else {
                return Ok(StopReason::Exhausted);
            };

            if self.heartbeat.beat() {
                self.log_status(*fetched);
            }

            let params = self.request_params(offset);
            let page = self
                .client
                .fetch_reviews_page(self.session.request_url(), self.session.headers(), &params)
                .await?;

            // Validate the whole page before committing any of it, so a
            // failed page can be re-fetched without duplicating reviews.
            let next = Cursor::after_page(page.next.as_deref())?;
            let reviews = page
                .data
                .into_iter()
                .map(normalize_review)
                .collect::<Result<Vec<_>, _>>()?;

            *fetched += self.append(reviews, opts.after);
            self.cursor = next;

            if self.cursor.is_exhausted() {
                return Ok(StopReason::Exhausted);
            }
            if opts.limit.is_some_and(|limit| *fetched >= limit) {
                return Ok(StopReason::LimitReached);
            }

            if let Some(delay) = opts.delay.filter(|d| !d.is_zero()) {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Appends reviews that pass the `after` filter; returns how many.
    fn append(&mut self, reviews: Vec<Review>, after: Option<DateTime<Utc>>) -> usize {
        let before = self.reviews.len();
        for review in reviews {
            if after.is_some_and(|after| review.date < after) {
                continue;
            }
            self.reviews.push(review);
            tracing::debug!(total = self.reviews.len(), "fetched review");
        }
        self.reviews.len() - before
    }

    fn request_params(&self, offset: u64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("l", self.config.locale.clone()),
            ("offset", offset.to_string()),
            ("limit", self.config.page_size.to_string()),
        ];
        params.extend(
            self.target
                .kind()
                .platform_filters()
                .iter()
                .map(|&(key, value)| (key, value.to_owned())),
        );
        params
    }
}
