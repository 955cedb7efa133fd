//! Repository for the `properties` table (houses).

use homeinv_core::house::{House, HouseInput};
use homeinv_core::types::{DbId, UserId};
use sqlx::PgPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, description, user_id, is_active, created_at, updated_at";

/// CRUD for houses. Every query is scoped to the owning user.
pub struct HouseRepo;

impl HouseRepo {
    /// Insert a new house owned by `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: UserId,
        input: &HouseInput,
    ) -> Result<House, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties (name, address, description, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.description)
            .bind(owner)
            .fetch_one(pool)
            .await
    }

    /// Find a house by id if it belongs to `owner`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner: UserId,
    ) -> Result<Option<House>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// List all houses of `owner`, ordered by name.
    pub async fn list_for_owner(pool: &PgPool, owner: UserId) -> Result<Vec<House>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE user_id = $1
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every editable field of a house.
    ///
    /// Returns `None` if the house does not exist or belongs to someone else.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: UserId,
        input: &HouseInput,
    ) -> Result<Option<House>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                name = $3,
                address = $4,
                description = $5
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a house. Returns `true` if a row was removed.
    ///
    /// Rooms and items go with it through the schema's `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId, owner: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
