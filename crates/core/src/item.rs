//! Items: inventory records belonging to a house and optionally a room.
//!
//! Besides the entity types this module owns the form-to-input conversion
//! (numeric and date parsing, empty-string normalization) and the
//! client-side list filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};
use crate::validation::{normalize_optional, not_blank, optional_text};

/// Date format accepted by the purchase-date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Fixed vocabulary for the `condition` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 4] = [Self::Excellent, Self::Good, Self::Fair, Self::Poor];

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

fn known_condition(value: &str) -> Result<(), ValidationError> {
    if ItemCondition::from_label(value).is_none() {
        return Err(ValidationError::new("unknown_condition"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

/// A row from the `items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    pub id: DbId,
    pub property_id: DbId,
    pub room_id: Option<DbId>,
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
    pub image_urls: Vec<String>,
    pub is_active: bool,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An item with its room name joined in, as returned by the house item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ItemWithRoom {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub item: Item,
    pub room_name: Option<String>,
}

/// Full-record input for creating or overwriting an item.
///
/// `image_urls` is deliberately absent: photos are attached through the
/// image endpoints and survive a form update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ItemInput {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub category: Option<String>,
    #[validate(length(max = 200))]
    pub brand: Option<String>,
    #[validate(length(max = 200))]
    pub model_number: Option<String>,
    #[validate(length(max = 200))]
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub purchase_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub current_value: Option<f64>,
    #[validate(custom(function = "known_condition"))]
    pub condition: Option<String>,
    #[validate(length(max = 4000))]
    pub notes: Option<String>,
    pub room_id: Option<DbId>,
}

impl ItemInput {
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let input = Self {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
            category: normalize_optional(self.category),
            brand: normalize_optional(self.brand),
            model_number: normalize_optional(self.model_number),
            serial_number: normalize_optional(self.serial_number),
            condition: normalize_optional(self.condition),
            notes: normalize_optional(self.notes),
            ..self
        };
        input.validate()?;
        Ok(input)
    }
}

/// Body of the image append/remove endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrlInput {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Editable form state for an item. Every field is the raw text of its input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub model_number: String,
    pub serial_number: String,
    pub purchase_date: String,
    pub purchase_price: String,
    pub current_value: String,
    pub condition: String,
    /// Selected room id, empty for "no room".
    pub room_id: String,
    pub notes: String,
}

impl ItemDraft {
    pub fn from_item(item: &Item) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: item.name.clone(),
            description: text(&item.description),
            category: text(&item.category),
            brand: text(&item.brand),
            model_number: text(&item.model_number),
            serial_number: text(&item.serial_number),
            purchase_date: item
                .purchase_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            purchase_price: item.purchase_price.map(|v| v.to_string()).unwrap_or_default(),
            current_value: item.current_value.map(|v| v.to_string()).unwrap_or_default(),
            condition: text(&item.condition),
            room_id: item.room_id.map(|id| id.to_string()).unwrap_or_default(),
            notes: text(&item.notes),
        }
    }

    /// Parse and validate the draft into an input ready to submit.
    pub fn to_input(&self) -> Result<ItemInput, CoreError> {
        ItemInput {
            name: self.name.clone(),
            description: optional_text(&self.description),
            category: optional_text(&self.category),
            brand: optional_text(&self.brand),
            model_number: optional_text(&self.model_number),
            serial_number: optional_text(&self.serial_number),
            purchase_date: parse_date("purchase_date", &self.purchase_date)?,
            purchase_price: parse_amount("purchase_price", &self.purchase_price)?,
            current_value: parse_amount("current_value", &self.current_value)?,
            condition: optional_text(&self.condition),
            notes: optional_text(&self.notes),
            room_id: parse_room(&self.room_id)?,
        }
        .into_validated()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parse a money field. Empty input is absent, never zero.
pub fn parse_amount(field: &str, text: &str) -> Result<Option<f64>, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(CoreError::Validation(format!(
            "{field} must be a non-negative number, got '{trimmed}'"
        ))),
    }
}

/// Parse a `YYYY-MM-DD` date field. Empty input is absent.
pub fn parse_date(field: &str, text: &str) -> Result<Option<NaiveDate>, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("{field} must be a date (YYYY-MM-DD)")))
}

/// Parse the room selection. The empty "no room" option is absent.
pub fn parse_room(text: &str) -> Result<Option<DbId>, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<DbId>()
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Invalid room selection '{trimmed}'")))
}

// ---------------------------------------------------------------------------
// Client-side filter
// ---------------------------------------------------------------------------

/// Whether `item` matches an already-lowercased, trimmed needle.
///
/// Matches on name, description, category, or brand.
fn matches_lowered(item: &Item, needle: &str) -> bool {
    let hit = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(needle));
    hit(Some(&item.name))
        || hit(item.description.as_deref())
        || hit(item.category.as_deref())
        || hit(item.brand.as_deref())
}

/// Case-insensitive substring match of `term` against an item.
///
/// A blank term matches everything.
pub fn matches_filter(item: &Item, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty() || matches_lowered(item, &needle)
}

/// Filter an already-fetched list without re-querying.
pub fn filter_items<'a>(items: &'a [ItemWithRoom], term: &str) -> Vec<&'a ItemWithRoom> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|row| matches_lowered(&row.item, &needle))
        .collect()
}
