//! Domain types and pure logic for the home-inventory service.
//!
//! Nothing in this crate performs I/O. The db, api, and client crates all
//! build on the entity types, drafts, and upload policy defined here.

pub mod error;
pub mod house;
pub mod item;
pub mod room;
pub mod search;
pub mod types;
pub mod upload;
pub mod validation;
