//! Repository for the `items` table.

use homeinv_core::item::{Item, ItemInput, ItemWithRoom};
use homeinv_core::types::{DbId, UserId};
use sqlx::PgPool;

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, property_id, room_id, name, description, category, brand, \
     model_number, serial_number, purchase_date, purchase_price, current_value, condition, \
     notes, image_urls, is_active, created_by, created_at, updated_at";

/// Same columns qualified with the `i` alias, for joins.
const JOINED_COLUMNS: &str = "i.id, i.property_id, i.room_id, i.name, i.description, \
     i.category, i.brand, i.model_number, i.serial_number, i.purchase_date, i.purchase_price, \
     i.current_value, i.condition, i.notes, i.image_urls, i.is_active, i.created_by, \
     i.created_at, i.updated_at";

/// CRUD for items, always scoped to a parent house.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        house_id: DbId,
        created_by: UserId,
        input: &ItemInput,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (property_id, room_id, name, description, category, brand,
                                model_number, serial_number, purchase_date, purchase_price,
                                current_value, condition, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(house_id)
            .bind(input.room_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.model_number)
            .bind(&input.serial_number)
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(input.current_value)
            .bind(&input.condition)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        house_id: DbId,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 AND property_id = $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(house_id)
            .fetch_optional(pool)
            .await
    }

    /// List the items of a house ordered by name, each with its room name.
    pub async fn list_by_house(
        pool: &PgPool,
        house_id: DbId,
    ) -> Result<Vec<ItemWithRoom>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, r.name AS room_name
             FROM items i
             LEFT JOIN rooms r ON r.id = i.room_id
             WHERE i.property_id = $1
             ORDER BY i.name ASC, i.id ASC"
        );
        sqlx::query_as::<_, ItemWithRoom>(&query)
            .bind(house_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every form field of an item. `image_urls` is left untouched.
    ///
    /// Returns `None` if no such item exists in the house.
    pub async fn update(
        pool: &PgPool,
        house_id: DbId,
        id: DbId,
        input: &ItemInput,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET
                room_id = $3,
                name = $4,
                description = $5,
                category = $6,
                brand = $7,
                model_number = $8,
                serial_number = $9,
                purchase_date = $10,
                purchase_price = $11,
                current_value = $12,
                condition = $13,
                notes = $14
             WHERE id = $1 AND property_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(house_id)
            .bind(input.room_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.model_number)
            .bind(&input.serial_number)
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(input.current_value)
            .bind(&input.condition)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, house_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND property_id = $2")
            .bind(id)
            .bind(house_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a photo URL to the item's `image_urls`.
    pub async fn append_image_url(
        pool: &PgPool,
        house_id: DbId,
        id: DbId,
        url: &str,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET image_urls = array_append(image_urls, $3)
             WHERE id = $1 AND property_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(house_id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Remove every occurrence of a photo URL from the item's `image_urls`.
    pub async fn remove_image_url(
        pool: &PgPool,
        house_id: DbId,
        id: DbId,
        url: &str,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET image_urls = array_remove(image_urls, $3)
             WHERE id = $1 AND property_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(house_id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Count items of a house that reference `room_id`.
    pub async fn count_in_room(
        pool: &PgPool,
        house_id: DbId,
        room_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM items WHERE property_id = $1 AND room_id = $2",
        )
        .bind(house_id)
        .bind(room_id)
        .fetch_one(pool)
        .await
    }
}
