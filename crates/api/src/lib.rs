// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Aviary API Library
//!
//! Credential issuance and session validation: Argon2id password storage,
//! signed short-lived access tokens, revocable refresh tokens, and the
//! HTTP surface over them.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
