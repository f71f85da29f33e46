//! HTTP routes
//!
//! Thin JSON adapters over [`SessionService`](crate::auth::SessionService)
//! and the store. No protocol logic lives here.

pub mod sessions;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/healthz", get(healthz))
        .route(
            "/api/users",
            post(users::create_user).put(users::update_user),
        )
        .route("/api/login", post(sessions::login))
        .route("/api/refresh", post(sessions::refresh))
        .route("/api/revoke", post(sessions::revoke))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "OK"
}
