//! Houses: the top-level property record owned by a single user.
//!
//! Stored in the `properties` table. Rooms and items are scoped to a house.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};
use crate::validation::{normalize_optional, not_blank, optional_text};

/// A row from the `properties` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct House {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub user_id: UserId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full-record input for creating or overwriting a house.
///
/// The owner is never part of the input; it always comes from the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HouseInput {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(length(max = 4000))]
    pub address: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl HouseInput {
    /// Trim the name and collapse blank optional fields to `None`, then validate.
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let input = Self {
            name: self.name.trim().to_string(),
            address: normalize_optional(self.address),
            description: normalize_optional(self.description),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Editable form state for a house.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseDraft {
    pub name: String,
    pub address: String,
    pub description: String,
}

impl HouseDraft {
    /// Seed a draft from an existing house for editing.
    pub fn from_house(house: &House) -> Self {
        Self {
            name: house.name.clone(),
            address: house.address.clone().unwrap_or_default(),
            description: house.description.clone().unwrap_or_default(),
        }
    }

    /// Validate the draft into an input ready to submit.
    pub fn to_input(&self) -> Result<HouseInput, CoreError> {
        HouseInput {
            name: self.name.clone(),
            address: optional_text(&self.address),
            description: optional_text(&self.description),
        }
        .into_validated()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Selection to use after `deleted` is removed.
///
/// Keeps the current selection when it was some other house; otherwise falls
/// back to the first remaining house, or none. `remaining` may still contain
/// the deleted row (e.g. a list fetched before the delete); it is skipped.
pub fn next_selection(current: Option<DbId>, deleted: DbId, remaining: &[House]) -> Option<DbId> {
    match current {
        Some(id) if id != deleted => Some(id),
        _ => remaining.iter().map(|h| h.id).find(|&id| id != deleted),
    }
}

/// Selection after the house list is (re)loaded.
///
/// A selection that no longer exists is dropped; an empty selection picks the
/// first house.
pub fn reconcile_selection(current: Option<DbId>, houses: &[House]) -> Option<DbId> {
    match current {
        Some(id) if houses.iter().any(|h| h.id == id) => Some(id),
        _ => houses.first().map(|h| h.id),
    }
}
