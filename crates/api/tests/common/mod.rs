#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use homeinv_api::auth::jwt::{generate_access_token, JwtConfig};
use homeinv_api::config::{ObjectStoreConfig, ServerConfig};
use homeinv_api::router::build_app_router;
use homeinv_api::state::AppState;
use homeinv_api::storage::{ObjectStore, StorageError};
use homeinv_core::upload::ObjectStoreEndpoint;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: None,
        },
        object_store: ObjectStoreConfig {
            endpoint: ObjectStoreEndpoint {
                host: "minio.test".to_string(),
                port: 9000,
                use_ssl: false,
            },
            access_key: "test-access".to_string(),
            secret_key: "test-secret".to_string(),
            bucket: "home-inventory".to_string(),
            region: "us-east-1".to_string(),
        },
    }
}

/// In-memory object store that records calls instead of talking to S3.
#[derive(Default)]
pub struct FakeObjectStore {
    pub fail: bool,
    pub ensure_calls: AtomicUsize,
    pub presign_calls: AtomicUsize,
}

impl FakeObjectStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    fn bucket(&self) -> &str {
        "home-inventory"
    }

    async fn ensure_bucket(&self) -> Result<(), StorageError> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::Request("store offline".into()));
        }
        Ok(())
    }

    async fn presign_put(&self, key: &str, content_type: &str) -> Result<String, StorageError> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::Presign("store offline".into()));
        }
        Ok(format!(
            "http://minio.test:9000/home-inventory/{key}?X-Amz-Signature=fake&content-type={content_type}"
        ))
    }
}

/// Build the full application router against the given pool and a
/// well-behaved fake object store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(FakeObjectStore::default()))
}

/// Build the application router with a caller-supplied object store.
pub fn build_test_app_with_store(pool: PgPool, store: Arc<dyn ObjectStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        object_store: store,
    };
    build_app_router(state, &config)
}

/// Mint an access token for `user_id`, signed with the test secret.
pub fn token_for(user_id: Uuid) -> String {
    generate_access_token(user_id, 900, &test_config().jwt).expect("token generation should succeed")
}

/// A fresh user id with a matching access token.
pub fn new_user() -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    (user_id, token_for(user_id))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), Some(body)).await
}

/// Create a house through the API and return its id.
pub async fn create_house(app: Router, name: &str, token: &str) -> i64 {
    let response = post_json_auth(app, "/api/v1/houses", serde_json::json!({ "name": name }), token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().expect("house id")
}
