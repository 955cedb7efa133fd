//! HTTP-level integration tests for `/search` and `/upload`.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, create_house, get_auth, post_json, post_json_auth, FakeObjectStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_returns_envelope_with_names(pool: PgPool) {
    let (_, token) = common::new_user();
    let house_id = create_house(common::build_test_app(pool.clone()), "Home", &token).await;
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/houses/{house_id}/rooms"),
        serde_json::json!({"name": "Den"}),
        &token,
    )
    .await;
    let room_id = body_json(response).await["id"].as_i64().unwrap();
    for body in [
        serde_json::json!({"name": "Television", "brand": "Sony", "room_id": room_id}),
        serde_json::json!({"name": "Toaster"}),
    ] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/houses/{house_id}/items"),
            body,
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(common::build_test_app(pool), "/api/v1/search?q=sony", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let hits = json["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Television");
    assert_eq!(hits[0]["house_name"], "Home");
    assert_eq!(hits[0]["room_name"], "Den");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_blank_search_returns_empty_list(pool: PgPool) {
    let (_, token) = common::new_user();
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/search?q=%20%20", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"data": []}));
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_presign_returns_url(pool: PgPool) {
    let (_, token) = common::new_user();
    let store = Arc::new(FakeObjectStore::default());
    let app = common::build_test_app_with_store(pool, store.clone());

    let response = post_json_auth(
        app,
        "/api/v1/upload",
        serde_json::json!({"fileName": "items/3/1700000000000-sofa.jpg", "contentType": "image/jpeg"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let url = json["presignedUrl"].as_str().unwrap();
    assert!(url.contains("items/3/1700000000000-sofa.jpg"));
    assert_eq!(store.presign_calls.load(Ordering::SeqCst), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_presign_failure_returns_500_with_message(pool: PgPool) {
    let (_, token) = common::new_user();
    let app = common::build_test_app_with_store(pool, Arc::new(FakeObjectStore::failing()));

    let response = post_json_auth(
        app,
        "/api/v1/upload",
        serde_json::json!({"fileName": "items/3/1-a.png", "contentType": "image/png"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to generate upload URL");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_presign_rejects_blank_name_and_anonymous_callers(pool: PgPool) {
    let (_, token) = common::new_user();
    let store = Arc::new(FakeObjectStore::default());

    let response = post_json_auth(
        common::build_test_app_with_store(pool.clone(), store.clone()),
        "/api/v1/upload",
        serde_json::json!({"fileName": " ", "contentType": "image/png"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app_with_store(pool, store.clone()),
        "/api/v1/upload",
        serde_json::json!({"fileName": "items/1/1-a.png", "contentType": "image/png"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.presign_calls.load(Ordering::SeqCst), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_ensure_bucket_returns_204(pool: PgPool) {
    let (_, token) = common::new_user();
    let store = Arc::new(FakeObjectStore::default());
    let app = common::build_test_app_with_store(pool, store.clone());

    let response = post_json_auth(app, "/api/v1/upload/bucket", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.ensure_calls.load(Ordering::SeqCst), 1);
}
