use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/upload`.
///
/// ```text
/// POST /        -> presign
/// POST /bucket  -> ensure_bucket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::presign))
        .route("/bucket", post(upload::ensure_bucket))
}
