//! Mock authentication: credential lookup, bearer tokens and the role hierarchy.
//!
//! The token is a reversible encoding of the user's claims, not a credential.
//! Replacing the mock with a real backend means swapping [`token`] for a
//! signed format and moving the credential table server-side; the hierarchy
//! check in [`has_permission`] stays as is.

mod credentials;
mod session;
pub mod token;

use thiserror::Error;

use crate::models::UserRole;

pub use credentials::{MockAuthenticator, DEFAULT_LOGIN_DELAY};
pub use session::{SessionManager, TOKEN_KEY, USER_KEY};
pub use token::{decode_token, generate_token, is_token_valid, verify_token, TokenClaims};

/// Authentication errors.
///
/// None of these are fatal: invalid credentials become an inline message and
/// token problems mean "not authenticated".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is malformed")]
    TokenMalformed,

    #[error("Local storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Whether `actual` is at least as privileged as `required`.
pub fn has_permission(actual: UserRole, required: UserRole) -> bool {
    actual.rank() >= required.rank()
}
