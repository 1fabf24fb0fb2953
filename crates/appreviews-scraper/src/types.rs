//! Response types for the storefront reviews endpoint.
//!
//! ## Observed shape
//!
//! ```json
//! {
//!   "next": "/v1/catalog/nz/apps/1261357853/reviews?l=en-GB&offset=20&limit=20",
//!   "data": [
//!     {
//!       "id": "5783034476",
//!       "type": "user-reviews",
//!       "attributes": {
//!         "date": "2020-04-10T09:12:45Z",
//!         "rating": 5,
//!         "title": "Great",
//!         "review": "Loved it",
//!         "userName": "someone",
//!         "isEdited": false
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! `next` is omitted on the last page. `id` has been seen as a string but is
//! modelled as a raw JSON value so a numeric id does not break parsing.
//! Attributes beyond the known set (for example `developerResponse`) are
//! captured through `#[serde(flatten)]`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of reviews.
#[derive(Debug, Deserialize)]
pub struct ReviewsPage {
    pub data: Vec<ReviewResource>,
    #[serde(default)]
    pub next: Option<String>,
}

/// A review resource wrapper: `{ "id", "type", "attributes" }`.
#[derive(Debug, Deserialize)]
pub struct ReviewResource {
    #[serde(default)]
    pub id: Option<Value>,
    pub attributes: RawReview,
}

/// Review attributes exactly as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    /// Timestamp in `YYYY-MM-DDTHH:MM:SSZ` form.
    pub date: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
