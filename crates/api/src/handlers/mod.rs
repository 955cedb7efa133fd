//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the repositories in `homeinv_db` and map errors via
//! [`AppError`](crate::error::AppError). Every data handler takes an
//! [`AuthUser`](crate::middleware::auth::AuthUser) and resolves the parent
//! house scoped to that user first.

pub mod auth;
pub mod house;
pub mod item;
pub mod room;
pub mod search;
pub mod upload;
