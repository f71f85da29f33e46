//! Storage seam for users and refresh tokens
//!
//! The [`Store`] trait is the value-level boundary to the relational
//! storage engine: the session protocols depend on it, never on SQL.
//! [`postgres::PgStore`] is the production implementation; tests run
//! against an in-memory store.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (email or token value).
    #[error("duplicate key")]
    Duplicate,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A registered user. The password hash is an opaque one-way digest; the
/// plaintext is never persisted or logged. Responses use a separate
/// profile struct, so this type deliberately does not derive `Serialize`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A persisted refresh token row. `revoked_at`, once set, is never
/// cleared.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub revoked_at: Option<OffsetDateTime>,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replace a user's credentials wholesale (email and password hash).
    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;

    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<RefreshToken, StoreError>;

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// Set `revoked_at` on an unrevoked token. Returns `false` when no row
    /// matched, i.e. the token is unknown or already revoked.
    async fn mark_refresh_token_revoked(&self, token: &str) -> Result<bool, StoreError>;
}
