//! Bearer token extraction from request headers

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::UnauthorizedReason;

/// Extract the raw bearer token from the `Authorization` header.
///
/// The header value must be exactly the literal `Bearer ` prefix followed
/// by the token: the prefix is case-sensitive and the token is returned
/// untouched, with no trimming. The same raw value may carry an access or
/// a refresh token; which one it is depends entirely on the endpoint.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, UnauthorizedReason> {
    let raw = match headers.get(AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map_err(|_| UnauthorizedReason::MalformedHeader)?,
        None => return Err(UnauthorizedReason::MissingHeader),
    };

    if raw.is_empty() {
        return Err(UnauthorizedReason::MissingHeader);
    }

    match raw.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(UnauthorizedReason::MalformedHeader),
    }
}
