//! Handlers for the `/houses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use homeinv_core::error::CoreError;
use homeinv_core::house::{House, HouseInput};
use homeinv_core::types::{DbId, UserId};
use homeinv_db::repositories::HouseRepo;
use homeinv_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load a house owned by `owner`, or 404.
///
/// Houses of other users are reported exactly like missing ones.
pub async fn require_owned_house(pool: &DbPool, id: DbId, owner: UserId) -> AppResult<House> {
    HouseRepo::find_owned(pool, id, owner)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "House", id }))
}

/// POST /api/v1/houses
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<HouseInput>,
) -> AppResult<(StatusCode, Json<House>)> {
    let input = input.into_validated()?;
    let house = HouseRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(house_id = house.id, user_id = %user.user_id, "House created");
    Ok((StatusCode::CREATED, Json(house)))
}

/// GET /api/v1/houses
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<House>>> {
    let houses = HouseRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(houses))
}

/// GET /api/v1/houses/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<House>> {
    let house = require_owned_house(&state.pool, id, user.user_id).await?;
    Ok(Json(house))
}

/// PUT /api/v1/houses/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<HouseInput>,
) -> AppResult<Json<House>> {
    let input = input.into_validated()?;
    let house = HouseRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "House", id }))?;
    Ok(Json(house))
}

/// DELETE /api/v1/houses/{id}
///
/// Rooms and items of the house go with it (`ON DELETE CASCADE`).
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HouseRepo::delete(&state.pool, id, user.user_id).await?;
    if deleted {
        tracing::info!(house_id = id, user_id = %user.user_id, "House deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "House", id }))
    }
}
