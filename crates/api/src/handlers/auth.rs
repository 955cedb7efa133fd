//! Handlers for the `/auth` resource.

use axum::Json;
use homeinv_core::types::UserId;
use serde::Serialize;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub user_id: UserId,
}

/// GET /api/v1/auth/me
pub async fn me(user: AuthUser) -> Json<WhoAmI> {
    Json(WhoAmI {
        user_id: user.user_id,
    })
}
