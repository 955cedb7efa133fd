//! Route definitions for the `/houses` resource.
//!
//! Rooms and items are nested under `/houses/{house_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{house, item, room};
use crate::state::AppState;

/// Routes mounted at `/houses`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update
/// DELETE /{id}                            -> delete
///
/// GET    /{house_id}/rooms                -> list_by_house
/// POST   /{house_id}/rooms                -> create
/// GET    /{house_id}/rooms/{id}           -> get_by_id
/// PUT    /{house_id}/rooms/{id}           -> update
/// DELETE /{house_id}/rooms/{id}           -> delete
///
/// GET    /{house_id}/items                -> list_by_house
/// POST   /{house_id}/items                -> create
/// GET    /{house_id}/items/{id}           -> get_by_id
/// PUT    /{house_id}/items/{id}           -> update
/// DELETE /{house_id}/items/{id}           -> delete
/// POST   /{house_id}/items/{id}/images    -> add_image
/// DELETE /{house_id}/items/{id}/images    -> remove_image
/// ```
pub fn router() -> Router<AppState> {
    let room_routes = Router::new()
        .route("/", get(room::list_by_house).post(room::create))
        .route(
            "/{id}",
            get(room::get_by_id).put(room::update).delete(room::delete),
        );

    let item_routes = Router::new()
        .route("/", get(item::list_by_house).post(item::create))
        .route(
            "/{id}",
            get(item::get_by_id).put(item::update).delete(item::delete),
        )
        .route(
            "/{id}/images",
            post(item::add_image).delete(item::remove_image),
        );

    Router::new()
        .route("/", get(house::list).post(house::create))
        .route(
            "/{id}",
            get(house::get_by_id)
                .put(house::update)
                .delete(house::delete),
        )
        .nest("/{house_id}/rooms", room_routes)
        .nest("/{house_id}/items", item_routes)
}
