//! User registration and credential replacement

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::password,
    error::ApiResult,
    state::AppState,
    store::{Store, User},
};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public user profile. The password hash never appears here.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let hash = password::hash_password(&req.password)?;
    let user = state.store.create_user(&req.email, &hash).await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Replace the authenticated user's credentials wholesale. The stored
/// digest is swapped in one write, never partially mutated.
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = state.sessions.authenticate(&headers)?;

    let hash = password::hash_password(&req.password)?;
    let user = state
        .store
        .update_user_credentials(user_id, &req.email, &hash)
        .await?;

    tracing::info!(user_id = %user.id, "user credentials replaced");
    Ok(Json(user.into()))
}
