//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token
//!   and performs per-record ownership checks.

pub mod auth;
