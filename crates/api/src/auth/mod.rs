//! Session-token handling.
//!
//! Identities are issued by an external auth provider; this service only
//! validates the HS256 access tokens it signs.
//!
//! - [`jwt`] -- token validation (and minting, for tests and local tooling).

pub mod jwt;
