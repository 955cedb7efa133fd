//! Rooms: sub-locations within a house.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::validation::{normalize_optional, not_blank, optional_text};

/// Confirmation text shown before a room is deleted.
pub const ROOM_DELETE_WARNING: &str = "Are you sure you want to delete this room? \
     Items in this room will remain but will no longer be associated with a room.";

/// A row from the `rooms` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Room {
    pub id: DbId,
    pub property_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub floor: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full-record input for creating or overwriting a room.
///
/// The parent house comes from the request path, not the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RoomInput {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub floor: Option<String>,
}

impl RoomInput {
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let input = Self {
            name: self.name.trim().to_string(),
            description: normalize_optional(self.description),
            floor: normalize_optional(self.floor),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Editable form state for a room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomDraft {
    pub name: String,
    pub description: String,
    pub floor: String,
}

impl RoomDraft {
    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            description: room.description.clone().unwrap_or_default(),
            floor: room.floor.clone().unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> Result<RoomInput, CoreError> {
        RoomInput {
            name: self.name.clone(),
            description: optional_text(&self.description),
            floor: optional_text(&self.floor),
        }
        .into_validated()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
