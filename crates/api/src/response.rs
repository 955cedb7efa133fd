//! Shared response envelope types for API handlers.
//!
//! Collection endpoints that can grow (search) answer with a `{ "data": ... }`
//! envelope. Use [`DataResponse`] instead of ad-hoc `serde_json::json!`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: hits }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
