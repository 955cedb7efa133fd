//! Free-text item search.
//!
//! The matching itself lives in the `search_items` database function; this
//! module owns the result row shape and the query guard shared by the
//! server and the client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp, UserId};

/// One hit returned by `search_items`, with parent names denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SearchHit {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<f64>,
    pub current_value: Option<f64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub property_id: DbId,
    pub house_name: String,
    pub room_id: Option<DbId>,
    pub room_name: Option<String>,
    pub image_urls: Vec<String>,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query-string parameters of the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Trimmed search term, or `None` when the input is empty or whitespace.
///
/// A `None` result means no search request should be issued at all.
pub fn normalize_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
