//! API error types
//!
//! Every authorization failure collapses into a single outward
//! `Unauthorized` response so callers cannot tell which check failed; the
//! sub-reason is kept for logs only. Infrastructure failures (hash/sign
//! primitives, storage) surface as a separate 5xx class so operators can
//! alert on them independently of routine auth noise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

/// Why a request was rejected as unauthorized. Logged, never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnauthorizedReason {
    #[error("authorization header missing or empty")]
    MissingHeader,
    #[error("authorization header malformed or wrong scheme")]
    MalformedHeader,
    #[error("access token invalid, expired, or mis-signed")]
    InvalidToken,
    #[error("unknown email or password mismatch")]
    BadCredentials,
    #[error("refresh token not found")]
    UnknownRefreshToken,
    #[error("refresh token revoked or expired")]
    RefreshTokenNotUsable,
    #[error("revoke matched no unrevoked token")]
    RevokeMiss,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] UnauthorizedReason),
    /// A hash or signature primitive failed. Infrastructure-level, never
    /// caused by request content.
    #[error("credential primitive failure: {0}")]
    Hashing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized(reason) => {
                tracing::warn!(reason = %reason, "request rejected as unauthorized");
                // One fixed body for every unauthorized outcome.
                (StatusCode::UNAUTHORIZED, "incorrect email or password")
            }
            ApiError::Store(StoreError::Duplicate) => {
                tracing::warn!("rejected write that violates a uniqueness constraint");
                (StatusCode::CONFLICT, "email already registered")
            }
            ApiError::Hashing(_) | ApiError::Store(_) => {
                tracing::error!(error = %self, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
