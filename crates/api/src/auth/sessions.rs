//! Session protocols
//!
//! [`SessionService`] is the single entry point the HTTP layer calls:
//! login (password → access + refresh pair), refresh (refresh token → new
//! access token), revoke (kill a session server-side), and per-request
//! authentication (access token → user id). All mutable state lives in
//! the store; the service itself only holds the signing secret.

use std::sync::Arc;

use axum::http::HeaderMap;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{
    auth::{bearer::bearer_token, jwt::JwtManager, password, refresh},
    error::{ApiResult, UnauthorizedReason},
    store::{Store, User},
};

/// Everything a successful login hands back to the HTTP layer.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn Store>,
    jwt: JwtManager,
}

impl SessionService {
    pub fn new(store: Arc<dyn Store>, jwt: JwtManager) -> Self {
        Self { store, jwt }
    }

    /// Login: verify the password, then issue an access token (requested
    /// ttl, capped server-side) and a fresh refresh token.
    ///
    /// An unknown email and a password mismatch produce the identical
    /// outward error, so callers cannot enumerate accounts.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        requested_ttl: Option<Duration>,
    ) -> ApiResult<LoginOutcome> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(UnauthorizedReason::BadCredentials)?;

        if !password::verify_password(&user.password_hash, password)? {
            return Err(UnauthorizedReason::BadCredentials.into());
        }

        let access_token = self.jwt.issue(user.id, requested_ttl)?;
        let refresh_row = refresh::issue(self.store.as_ref(), user.id).await?;

        tracing::info!(user_id = %user.id, "login succeeded");

        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token: refresh_row.token,
        })
    }

    /// Refresh: mint a new access token (fixed one-hour ttl) bound to the
    /// refresh token's owner. The refresh token itself is not rotated and
    /// stays usable until its own expiry or an explicit revoke.
    pub async fn refresh(&self, headers: &HeaderMap) -> ApiResult<String> {
        let token = bearer_token(headers)?;

        let row = self
            .store
            .find_refresh_token(token)
            .await?
            .ok_or(UnauthorizedReason::UnknownRefreshToken)?;

        if !row.is_usable(OffsetDateTime::now_utc()) {
            return Err(UnauthorizedReason::RefreshTokenNotUsable.into());
        }

        self.jwt.issue(row.user_id, None)
    }

    /// Revoke: irreversibly mark the presented refresh token unusable.
    /// A token that is unknown or already revoked is an error, not a
    /// no-op.
    pub async fn revoke(&self, headers: &HeaderMap) -> ApiResult<()> {
        let token = bearer_token(headers)?;

        if !self.store.mark_refresh_token_revoked(token).await? {
            return Err(UnauthorizedReason::RevokeMiss.into());
        }

        tracing::info!("refresh token revoked");
        Ok(())
    }

    /// Per-request authentication: header → verified user id. A pure
    /// function of the request; no storage access, no side effects.
    pub fn authenticate(&self, headers: &HeaderMap) -> ApiResult<Uuid> {
        let token = bearer_token(headers)?;
        self.jwt.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::store::memory::MemStore;
    use axum::body::to_bytes;
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum::response::IntoResponse;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    const TEST_SECRET: &str = "session-tests-secret-0123456789ab";

    async fn service_with_user(email: &str, password: &str) -> (SessionService, Arc<MemStore>) {
        let store = Arc::new(MemStore::new());
        let hash = password::hash_password(password).unwrap();
        store.create_user(email, &hash).await.unwrap();

        let service = SessionService::new(store.clone(), JwtManager::new(TEST_SECRET));
        (service, store)
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    async fn rendered(err: ApiError) -> (StatusCode, Vec<u8>) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn login_refresh_revoke_end_to_end() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;

        // Login yields a verifiable access token and a refresh token.
        let outcome = service.login("a@b.com", "Secret1", None).await.unwrap();
        let jwt = JwtManager::new(TEST_SECRET);
        let user_id = jwt.verify(&outcome.access_token).unwrap();
        assert_eq!(user_id, outcome.user.id);

        // Refresh mints a distinct, equally valid access token.
        let headers = bearer_headers(&outcome.refresh_token);
        let second = service.refresh(&headers).await.unwrap();
        assert_ne!(second, outcome.access_token);
        assert_eq!(jwt.verify(&second).unwrap(), outcome.user.id);

        // Revoke kills the session; further refreshes are unauthorized.
        service.revoke(&headers).await.unwrap();
        let err = service.refresh(&headers).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::RefreshTokenNotUsable)
        ));

        // So is revoking a second time.
        let err = service.revoke(&headers).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::RevokeMiss)
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_byte_identical() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;

        let wrong_password = service
            .login("a@b.com", "WrongPassword", None)
            .await
            .unwrap_err();
        let unknown_email = service
            .login("nobody@b.com", "Secret1", None)
            .await
            .unwrap_err();

        let (status_a, body_a) = rendered(wrong_password).await;
        let (status_b, body_b) = rendered(unknown_email).await;

        assert_eq!(status_a, StatusCode::UNAUTHORIZED);
        assert_eq!(status_a, status_b);
        assert_eq!(body_a, body_b);
    }

    #[tokio::test]
    async fn oversized_ttl_request_is_capped() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;

        let outcome = service
            .login("a@b.com", "Secret1", Some(Duration::seconds(100_000)))
            .await
            .unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[crate::auth::jwt::ISSUER]);
        let claims = decode::<crate::auth::jwt::Claims>(
            &outcome.access_token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn expired_refresh_token_is_unauthorized() {
        let (service, store) = service_with_user("a@b.com", "Secret1").await;

        let outcome = service.login("a@b.com", "Secret1", None).await.unwrap();
        store.expire_refresh_token(&outcome.refresh_token);

        let err = service
            .refresh(&bearer_headers(&outcome.refresh_token))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::RefreshTokenNotUsable)
        ));
    }

    #[tokio::test]
    async fn access_token_never_satisfies_a_refresh_lookup() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;
        let outcome = service.login("a@b.com", "Secret1", None).await.unwrap();

        // The signed access token is not a row key in the refresh store.
        let err = service
            .refresh(&bearer_headers(&outcome.access_token))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::UnknownRefreshToken)
        ));
    }

    #[tokio::test]
    async fn refresh_token_never_authenticates_a_request() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;
        let outcome = service.login("a@b.com", "Secret1", None).await.unwrap();

        let err = service
            .authenticate(&bearer_headers(&outcome.refresh_token))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn authenticate_rejects_missing_and_malformed_headers() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;

        let err = service.authenticate(&HeaderMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::MissingHeader)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        let err = service.authenticate(&headers).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized(UnauthorizedReason::MalformedHeader)
        ));
    }

    #[tokio::test]
    async fn refresh_does_not_rotate_the_refresh_token() {
        let (service, _store) = service_with_user("a@b.com", "Secret1").await;
        let outcome = service.login("a@b.com", "Secret1", None).await.unwrap();

        // Several refreshes in a row, all off the same token.
        let headers = bearer_headers(&outcome.refresh_token);
        for _ in 0..3 {
            service.refresh(&headers).await.unwrap();
        }
    }
}
