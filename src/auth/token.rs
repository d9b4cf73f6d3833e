//! Bearer token codec.
//!
//! Tokens are standard base64 over the JSON claim set. They are unsigned:
//! anyone can decode or forge one.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::models::{User, UserRole};

const ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Claims embedded in a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    /// Expiry as milliseconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.exp)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp_millis()
    }
}

/// Mint a token for `user` expiring `ttl` from now.
pub fn generate_token(user: &User, ttl: Duration) -> String {
    generate_token_at(user, Utc::now(), ttl)
}

pub fn generate_token_at(user: &User, now: DateTime<Utc>, ttl: Duration) -> String {
    let claims = TokenClaims {
        id: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        exp: expiry(now, ttl).timestamp_millis(),
    };
    // Serializing a struct of strings and integers cannot fail.
    let json = serde_json::to_vec(&claims).unwrap_or_default();
    ENGINE.encode(json)
}

/// `now + ttl`, saturating at the representable range instead of overflowing.
fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Decode the claims without looking at the expiry.
pub fn decode_token(token: &str) -> Result<TokenClaims, AuthError> {
    let bytes = ENGINE
        .decode(token.trim())
        .map_err(|_| AuthError::TokenMalformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::TokenMalformed)
}

/// Decode the claims and reject them if they expired before `now`.
pub fn verify_token(token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
    let claims = decode_token(token)?;
    if claims.is_expired_at(now) {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}

/// `true` when the token decodes and has not expired yet.
pub fn is_token_valid(token: &str) -> bool {
    verify_token(token, Utc::now()).is_ok()
}
