//! Password hashing and verification
//!
//! Argon2id with per-call random salts. The default cost parameters put a
//! single hash in the tens of milliseconds, slow enough to resist offline
//! cracking without making login latency unacceptable.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{ApiError, ApiResult};

/// Hash a plaintext password into a PHC-format digest.
///
/// Accepts any password content; an error means the primitive or entropy
/// source failed, never the input.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a plaintext candidate against a stored digest in constant time.
///
/// A mismatch is an outcome (`Ok(false)`), not an error; `Err` is reserved
/// for a malformed digest or primitive failure.
pub fn verify_password(digest: &str, password: &str) -> ApiResult<bool> {
    let parsed = PasswordHash::new(digest).map_err(|e| ApiError::Hashing(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ApiError::Hashing(e.to_string())),
    }
}
