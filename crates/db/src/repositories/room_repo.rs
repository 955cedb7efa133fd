//! Repository for the `rooms` table.

use homeinv_core::room::{Room, RoomInput};
use homeinv_core::types::DbId;
use sqlx::PgPool;

const COLUMNS: &str =
    "id, property_id, name, description, floor, is_active, created_at, updated_at";

/// CRUD for rooms, always scoped to a parent house.
pub struct RoomRepo;

impl RoomRepo {
    pub async fn create(
        pool: &PgPool,
        house_id: DbId,
        input: &RoomInput,
    ) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (property_id, name, description, floor)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(house_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.floor)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        house_id: DbId,
        id: DbId,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1 AND property_id = $2");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(house_id)
            .fetch_optional(pool)
            .await
    }

    /// List the rooms of a house ordered by name ascending.
    pub async fn list_by_house(pool: &PgPool, house_id: DbId) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rooms
             WHERE property_id = $1
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(house_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every editable field. Returns `None` if no such room in the house.
    pub async fn update(
        pool: &PgPool,
        house_id: DbId,
        id: DbId,
        input: &RoomInput,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                name = $3,
                description = $4,
                floor = $5
             WHERE id = $1 AND property_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(house_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.floor)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room. Its items stay, with `room_id` cleared by the schema.
    pub async fn delete(pool: &PgPool, house_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1 AND property_id = $2")
            .bind(id)
            .bind(house_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
