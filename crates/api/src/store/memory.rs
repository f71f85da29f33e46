//! In-memory store for unit tests. Not wired into any binary.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{RefreshToken, Store, StoreError, User};

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    tokens: HashMap<String, RefreshToken>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a token's expiry into the past to simulate clock advance.
    pub fn expire_refresh_token(&self, token: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(row) = inner.tokens.get_mut(token) {
            row.expires_at = OffsetDateTime::now_utc() - time::Duration::seconds(1);
        }
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Duplicate);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;
        user.email = email.to_string();
        user.password_hash = password_hash.to_string();
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }

    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<RefreshToken, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.tokens.contains_key(token) {
            return Err(StoreError::Duplicate);
        }
        let row = RefreshToken {
            token: token.to_string(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
            expires_at,
            revoked_at: None,
        };
        inner.tokens.insert(token.to_string(), row.clone());
        Ok(row)
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tokens.get(token).cloned())
    }

    async fn mark_refresh_token_revoked(&self, token: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.tokens.get_mut(token) {
            Some(row) if row.revoked_at.is_none() => {
                row.revoked_at = Some(OffsetDateTime::now_utc());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
