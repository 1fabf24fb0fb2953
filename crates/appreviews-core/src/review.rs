use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single storefront review after normalization.
///
/// The well-known attributes are lifted into typed fields. Anything else the
/// reviews API returns (developer responses, new fields) is kept verbatim in
/// `extra` so no upstream data is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Upstream resource id, when the API supplies one.
    pub id: Option<String>,
    pub date: DateTime<Utc>,
    pub rating: Option<u8>,
    pub title: Option<String>,
    /// Review body text.
    pub review: Option<String>,
    pub user_name: Option<String>,
    pub is_edited: bool,
    #[serde(default)]
    pub extra: Map<String, Value>,
}
