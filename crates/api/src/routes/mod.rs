pub mod auth;
pub mod health;
pub mod house;
pub mod search;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/me                                     whoami (requires auth)
///
/// /houses                                      list, create
/// /houses/{id}                                 get, update, delete
/// /houses/{house_id}/rooms                     list, create
/// /houses/{house_id}/rooms/{id}                get, update, delete
/// /houses/{house_id}/items                     list (with room name), create
/// /houses/{house_id}/items/{id}                get, update, delete
/// /houses/{house_id}/items/{id}/images         append, remove photo URL
///
/// /search                                      item search (?q=)
///
/// /upload                                      presigned PUT URL (POST)
/// /upload/bucket                               ensure bucket (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Houses, with rooms and items nested below.
        .nest("/houses", house::router())
        .nest("/search", search::router())
        .nest("/upload", upload::router())
}
