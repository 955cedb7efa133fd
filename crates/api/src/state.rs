use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ObjectStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: homeinv_db::DbPool,
    /// Server configuration (token validation, object-store endpoint).
    pub config: Arc<ServerConfig>,
    /// Object store holding item photos.
    pub object_store: Arc<dyn ObjectStore>,
}
