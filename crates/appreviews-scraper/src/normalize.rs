//! Normalization from raw API resources to [`appreviews_core::Review`].

use appreviews_core::Review;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::ScraperError;
use crate::types::ReviewResource;

/// Textual format of the `date` attribute.
pub const REVIEW_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses a review timestamp such as `2020-04-10T09:12:45Z`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidDate`] if `value` does not match
/// [`REVIEW_DATE_FORMAT`].
pub fn parse_review_date(value: &str) -> Result<DateTime<Utc>, ScraperError> {
    NaiveDateTime::parse_from_str(value, REVIEW_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ScraperError::InvalidDate {
            value: value.to_owned(),
            source,
        })
}

/// Normalizes a raw [`ReviewResource`] into a [`Review`].
///
/// # Errors
///
/// Returns [`ScraperError::InvalidDate`] if the `date` attribute is malformed.
pub fn normalize_review(resource: ReviewResource) -> Result<Review, ScraperError> {
    let raw = resource.attributes;
    let date = parse_review_date(&raw.date)?;

    let id = match resource.id {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(Review {
        id,
        date,
        rating: raw.rating,
        title: raw.title,
        review: raw.review,
        user_name: raw.user_name,
        is_edited: raw.is_edited,
        extra: raw.extra,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
