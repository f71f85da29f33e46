//! Opaque refresh tokens
//!
//! Long-lived, storage-backed credentials used solely to mint new access
//! tokens. The token value carries no structure: 256 bits from the OS
//! CSPRNG, hex-encoded. Access and refresh tokens never cross namespaces;
//! a signed access token can never satisfy a refresh-token lookup.

use rand::rngs::OsRng;
use rand::TryRngCore;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::store::{RefreshToken, Store};

/// Refresh tokens live for 60 days from issuance.
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(60);

const TOKEN_BYTES: usize = 32;

/// Generate a fresh opaque token value: a fixed-length 64-char hex string.
pub fn generate_refresh_token() -> ApiResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    let mut rng = OsRng;
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| ApiError::Hashing(e.to_string()))?;

    Ok(hex::encode(bytes))
}

/// Issue and persist a refresh token for `user_id`, expiring 60 days out.
///
/// At 256 bits of entropy a collision is negligible, so there is no retry
/// loop; the storage unique constraint is the authoritative backstop.
pub async fn issue(store: &dyn Store, user_id: Uuid) -> ApiResult<RefreshToken> {
    let token = generate_refresh_token()?;
    let expires_at = OffsetDateTime::now_utc() + REFRESH_TOKEN_TTL;

    let row = store.insert_refresh_token(&token, user_id, expires_at).await?;
    Ok(row)
}

impl RefreshToken {
    /// Usable only while unrevoked and unexpired. Exact comparison, no
    /// leeway window.
    pub fn is_usable(&self, now: OffsetDateTime) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}
