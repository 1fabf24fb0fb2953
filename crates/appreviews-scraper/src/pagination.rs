//! Offset-based pagination for the reviews endpoint.
//!
//! Every page response may carry a `next` field holding a relative URL for
//! the following page. The cursor is the `offset` query value inside it:
//!
//! ```text
//! /v1/catalog/nz/apps/1261357853/reviews?l=en-GB&offset=20&limit=20&platform=web
//! ```
//!
//! A missing `next` means the listing is exhausted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScraperError;

static NEXT_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+offset=([0-9]+).*$").expect("valid offset regex"));

/// Position in the review listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Offset(u64),
    Exhausted,
}

impl Cursor {
    #[must_use]
    pub fn is_exhausted(self) -> bool {
        matches!(self, Cursor::Exhausted)
    }

    /// Cursor that follows a page whose `next` field is `next`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MalformedNext`] if `next` is present but holds
    /// no numeric `offset`.
    pub fn after_page(next: Option<&str>) -> Result<Self, ScraperError> {
        match next {
            None => Ok(Cursor::Exhausted),
            Some(next) => extract_next_offset(next)
                .map(Cursor::Offset)
                .ok_or_else(|| ScraperError::MalformedNext {
                    next: next.to_owned(),
                }),
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::Offset(0)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Offset(offset) => write!(f, "{offset}"),
            Cursor::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Extracts the numeric `offset` query value from a `next` link.
#[must_use]
pub fn extract_next_offset(next: &str) -> Option<u64> {
    NEXT_OFFSET
        .captures(next)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}
