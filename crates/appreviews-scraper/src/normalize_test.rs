use chrono::{Datelike, TimeZone, Timelike};
use serde_json::json;

use super::*;

fn resource(value: serde_json::Value) -> ReviewResource {
    serde_json::from_value(value).expect("fixture should deserialize")
}

#[test]
fn parse_review_date_reads_utc_timestamp() {
    let date = parse_review_date("2020-04-10T09:12:45Z").unwrap();
    assert_eq!(date.year(), 2020);
    assert_eq!(date.month(), 4);
    assert_eq!(date.day(), 10);
    assert_eq!(date.hour(), 9);
    assert_eq!(date.second(), 45);
}

#[test]
fn parse_review_date_rejects_offset_form() {
    let err = parse_review_date("2020-04-10T09:12:45+02:00").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidDate { ref value, .. } if value == "2020-04-10T09:12:45+02:00"),
        "expected InvalidDate, got: {err:?}"
    );
}

#[test]
fn normalize_review_lifts_known_attributes() {
    let review = normalize_review(resource(json!({
        "id": "5783034476",
        "type": "user-reviews",
        "attributes": {
            "date": "2021-01-02T03:04:05Z",
            "rating": 4,
            "title": "Pretty good",
            "review": "Crashes sometimes",
            "userName": "gamer42",
            "isEdited": true
        }
    })))
    .unwrap();

    assert_eq!(review.id.as_deref(), Some("5783034476"));
    assert_eq!(
        review.date,
        Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap()
    );
    assert_eq!(review.rating, Some(4));
    assert_eq!(review.title.as_deref(), Some("Pretty good"));
    assert_eq!(review.review.as_deref(), Some("Crashes sometimes"));
    assert_eq!(review.user_name.as_deref(), Some("gamer42"));
    assert!(review.is_edited);
    assert!(review.extra.is_empty());
}

#[test]
fn normalize_review_keeps_unknown_attributes() {
    let review = normalize_review(resource(json!({
        "attributes": {
            "date": "2021-01-02T03:04:05Z",
            "developerResponse": { "id": 1, "body": "Thanks!" }
        }
    })))
    .unwrap();

    assert!(review.id.is_none());
    assert!(!review.is_edited);
    assert_eq!(
        review.extra.get("developerResponse"),
        Some(&json!({ "id": 1, "body": "Thanks!" }))
    );
}

#[test]
fn normalize_review_stringifies_numeric_id() {
    let review = normalize_review(resource(json!({
        "id": 99,
        "attributes": { "date": "2021-01-02T03:04:05Z" }
    })))
    .unwrap();
    assert_eq!(review.id.as_deref(), Some("99"));
}

#[test]
fn normalize_review_fails_on_bad_date() {
    let result = normalize_review(resource(json!({
        "attributes": { "date": "yesterday" }
    })));
    assert!(matches!(result, Err(ScraperError::InvalidDate { .. })));
}
