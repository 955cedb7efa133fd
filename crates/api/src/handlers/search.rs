//! Handler for `/search`.

use axum::extract::{Query, State};
use axum::Json;
use homeinv_core::search::{normalize_query, SearchHit, SearchParams};
use homeinv_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/search?q=
///
/// A blank query answers with an empty list without touching the database.
pub async fn search_items(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<SearchHit>>>> {
    let Some(term) = normalize_query(&params.q) else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };
    let hits = SearchRepo::search_items(&state.pool, user.user_id, term).await?;
    tracing::debug!(user_id = %user.user_id, term, hits = hits.len(), "Item search");
    Ok(Json(DataResponse { data: hits }))
}
