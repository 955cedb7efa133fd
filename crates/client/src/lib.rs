//! Client side of the home-inventory service.
//!
//! - [`client::InventoryClient`] -- typed HTTP client for the `/api/v1` surface.
//! - [`session`] -- the signed-in user's token, passed explicitly to every call.
//! - [`views`] -- headless view-models for the house, room and item lists and search.
//! - [`upload::PhotoUploader`] -- the presigned-URL photo upload flow.

pub mod client;
pub mod decode;
pub mod error;
pub mod session;
pub mod upload;
pub mod views;

pub use client::{InventoryApi, InventoryClient, UploadTransport};
pub use error::ClientError;
pub use session::{AuthContext, Session};

#[cfg(test)]
mod testing;
