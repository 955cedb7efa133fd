//! Handlers for items, nested under `/houses/{house_id}/items`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homeinv_core::error::CoreError;
use homeinv_core::item::{ImageUrlInput, Item, ItemInput, ItemWithRoom};
use homeinv_core::types::DbId;
use homeinv_db::repositories::{ItemRepo, RoomRepo};
use homeinv_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::house::require_owned_house;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn item_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Item", id })
}

/// Validate the form input and make sure its room belongs to the same house.
async fn validated_input(pool: &DbPool, house_id: DbId, input: ItemInput) -> AppResult<ItemInput> {
    let input = input.into_validated()?;
    if let Some(room_id) = input.room_id {
        if RoomRepo::find_by_id(pool, house_id, room_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Room {room_id} does not belong to house {house_id}"
            )));
        }
    }
    Ok(input)
}

/// POST /api/v1/houses/{house_id}/items
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(house_id): Path<DbId>,
    Json(input): Json<ItemInput>,
) -> AppResult<(StatusCode, Json<Item>)> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let input = validated_input(&state.pool, house_id, input).await?;
    let item = ItemRepo::create(&state.pool, house_id, user.user_id, &input).await?;
    tracing::info!(house_id, item_id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/houses/{house_id}/items
pub async fn list_by_house(
    user: AuthUser,
    State(state): State<AppState>,
    Path(house_id): Path<DbId>,
) -> AppResult<Json<Vec<ItemWithRoom>>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let items = ItemRepo::list_by_house(&state.pool, house_id).await?;
    Ok(Json(items))
}

/// GET /api/v1/houses/{house_id}/items/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Item>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let item = ItemRepo::find_by_id(&state.pool, house_id, id)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    Ok(Json(item))
}

/// PUT /api/v1/houses/{house_id}/items/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<ItemInput>,
) -> AppResult<Json<Item>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let input = validated_input(&state.pool, house_id, input).await?;
    let item = ItemRepo::update(&state.pool, house_id, id, &input)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    Ok(Json(item))
}

/// DELETE /api/v1/houses/{house_id}/items/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    if ItemRepo::delete(&state.pool, house_id, id).await? {
        tracing::info!(house_id, item_id = id, "Item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(item_not_found(id))
    }
}

/// POST /api/v1/houses/{house_id}/items/{id}/images
pub async fn add_image(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<ImageUrlInput>,
) -> AppResult<Json<Item>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let url = input.url.trim();
    if url.is_empty() {
        return Err(AppError::BadRequest("url must not be empty".into()));
    }
    let item = ItemRepo::append_image_url(&state.pool, house_id, id, url)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    tracing::debug!(house_id, item_id = id, photos = item.image_urls.len(), "Photo attached");
    Ok(Json(item))
}

/// DELETE /api/v1/houses/{house_id}/items/{id}/images
pub async fn remove_image(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<ImageUrlInput>,
) -> AppResult<Json<Item>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let item = ItemRepo::remove_image_url(&state.pool, house_id, id, input.url.trim())
        .await?
        .ok_or_else(|| item_not_found(id))?;
    Ok(Json(item))
}
