//! Handlers for rooms, nested under `/houses/{house_id}/rooms`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homeinv_core::error::CoreError;
use homeinv_core::room::{Room, RoomInput};
use homeinv_core::types::DbId;
use homeinv_db::repositories::{ItemRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::house::require_owned_house;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/houses/{house_id}/rooms
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(house_id): Path<DbId>,
    Json(input): Json<RoomInput>,
) -> AppResult<(StatusCode, Json<Room>)> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let input = input.into_validated()?;
    let room = RoomRepo::create(&state.pool, house_id, &input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /api/v1/houses/{house_id}/rooms
pub async fn list_by_house(
    user: AuthUser,
    State(state): State<AppState>,
    Path(house_id): Path<DbId>,
) -> AppResult<Json<Vec<Room>>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let rooms = RoomRepo::list_by_house(&state.pool, house_id).await?;
    Ok(Json(rooms))
}

/// GET /api/v1/houses/{house_id}/rooms/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Room>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let room = RoomRepo::find_by_id(&state.pool, house_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// PUT /api/v1/houses/{house_id}/rooms/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<RoomInput>,
) -> AppResult<Json<Room>> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let input = input.into_validated()?;
    let room = RoomRepo::update(&state.pool, house_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Room", id }))?;
    Ok(Json(room))
}

/// DELETE /api/v1/houses/{house_id}/rooms/{id}
///
/// Items in the room are kept; their `room_id` is cleared by the schema.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((house_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_owned_house(&state.pool, house_id, user.user_id).await?;
    let orphaned = ItemRepo::count_in_room(&state.pool, house_id, id).await?;
    let deleted = RoomRepo::delete(&state.pool, house_id, id).await?;
    if deleted {
        tracing::info!(house_id, room_id = id, orphaned, "Room deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Room", id }))
    }
}
