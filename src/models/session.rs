use serde::{Deserialize, Serialize};

use super::user::User;

/// The logged-in state of the running client.
///
/// Exactly one session exists per process. It starts unauthenticated, becomes
/// authenticated on login or restore, and returns to the default on logout.
/// `loading` is only true while a login is in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl Session {
    /// An authenticated session for the given user and token.
    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            loading: false,
        }
    }
}

/// Result of a successful login: the user (without password) and its token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}
