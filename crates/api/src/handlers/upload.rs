//! Handlers for `/upload`: bucket bootstrap and presigned PUT URLs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use homeinv_core::upload::{UploadUrlRequest, UploadUrlResponse};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/upload
///
/// `fileName` is the full object key; the client builds it.
pub async fn presign(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UploadUrlRequest>,
) -> AppResult<Json<UploadUrlResponse>> {
    let key = input.file_name.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("fileName must not be empty".into()));
    }

    let presigned_url = state
        .object_store
        .presign_put(key, &input.content_type)
        .await
        .map_err(|source| AppError::Storage {
            message: "Failed to generate upload URL",
            source,
        })?;

    tracing::debug!(user_id = %user.user_id, key, "Issued upload URL");
    Ok(Json(UploadUrlResponse { presigned_url }))
}

/// POST /api/v1/upload/bucket
pub async fn ensure_bucket(_user: AuthUser, State(state): State<AppState>) -> AppResult<StatusCode> {
    state
        .object_store
        .ensure_bucket()
        .await
        .map_err(|source| AppError::Storage {
            message: "Failed to prepare photo storage",
            source,
        })?;
    Ok(StatusCode::NO_CONTENT)
}
