//! Login, refresh, and revoke endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{error::ApiResult, routes::users::UserResponse, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Requested access-token lifetime in seconds. Optional, and capped
    /// server-side regardless of the value.
    pub expires_in_seconds: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let requested_ttl = req.expires_in_seconds.map(Duration::seconds);

    let outcome = state
        .sessions
        .login(&req.email, &req.password, requested_ttl)
        .await?;

    Ok(Json(LoginResponse {
        user: outcome.user.into(),
        token: outcome.access_token,
        refresh_token: outcome.refresh_token,
    }))
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<RefreshResponse>> {
    let token = state.sessions.refresh(&headers).await?;
    Ok(Json(RefreshResponse { token }))
}

pub async fn revoke(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    state.sessions.revoke(&headers).await?;
    Ok(StatusCode::NO_CONTENT)
}
