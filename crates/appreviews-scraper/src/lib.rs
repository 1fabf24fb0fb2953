pub mod bootstrap;
pub mod client;
pub mod error;
pub mod heartbeat;
pub mod normalize;
pub mod pagination;
mod rate_limit;
pub mod scraper;
pub mod search;
pub mod types;

pub use bootstrap::{extract_token, BearerToken, MetaTagTokenExtractor, Session, TokenExtractor};
pub use client::{Endpoints, ReviewsClient};
pub use error::{BootstrapError, ScraperError};
pub use normalize::normalize_review;
pub use pagination::Cursor;
pub use scraper::{RetrievalOutcome, RetrieveOptions, ReviewScraper, StopReason};
pub use search::{resolve_target, IdResolver, WebSearchResolver};
