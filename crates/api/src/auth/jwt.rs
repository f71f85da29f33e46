//! Signed access tokens
//!
//! Stateless HS256 assertions of user identity, verified without a storage
//! lookup. The signing secret is injected at construction and shared by
//! all service instances; it is never read from a global.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, UnauthorizedReason};

/// Fixed issuer claim identifying this service.
pub const ISSUER: &str = "aviary";

/// Lifetime used when the caller requests none (or exactly zero).
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::seconds(3600);

/// Hard ceiling on the access-token lifetime. Caller requests above this
/// are silently capped; this is an abuse-prevention bound, not a
/// pass-through of client input.
pub const MAX_ACCESS_TOKEN_TTL: Duration = Duration::seconds(3600);

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed access token for `user_id`.
    ///
    /// The effective ttl is the requested one capped at
    /// [`MAX_ACCESS_TOKEN_TTL`], or [`DEFAULT_ACCESS_TOKEN_TTL`] when the
    /// request is absent or zero. A negative request passes through and
    /// produces a token that is already expired at issue time.
    pub fn issue(&self, user_id: Uuid, requested_ttl: Option<Duration>) -> ApiResult<String> {
        let ttl = effective_ttl(requested_ttl);
        let now = OffsetDateTime::now_utc();

        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.unix_timestamp(),
            exp: (now + ttl).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Hashing(e.to_string()))
    }

    /// Verify a token and return the user id it asserts.
    ///
    /// Bad signature, elapsed expiry, wrong issuer, and an unparseable
    /// subject all collapse into the same `Unauthorized` outcome; the
    /// distinction lives only in the logs.
    pub fn verify(&self, token: &str) -> ApiResult<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry comparison. The crate default allows 60s of skew.
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "access token rejected");
            UnauthorizedReason::InvalidToken
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|e| {
            tracing::debug!(error = %e, "access token subject is not a user id");
            ApiError::from(UnauthorizedReason::InvalidToken)
        })
    }
}

fn effective_ttl(requested: Option<Duration>) -> Duration {
    match requested {
        None => DEFAULT_ACCESS_TOKEN_TTL,
        Some(ttl) if ttl.is_zero() => DEFAULT_ACCESS_TOKEN_TTL,
        Some(ttl) => ttl.min(MAX_ACCESS_TOKEN_TTL),
    }
}
