//! Logical destinations and the guard that decides which are reachable.
//!
//! Session state alone determines where a user may go: unauthenticated users
//! always land on the login page, and routes that need a role send
//! under-privileged users to `Unauthorized`.

use std::fmt;

use uuid::Uuid;

use crate::auth::has_permission;
use crate::models::{Session, UserRole};
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    ProjectDetail(Uuid),
    Unauthorized,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::ProjectDetail(id) => format!("/projects/{}", id),
            Self::Unauthorized => "/unauthorized".to_string(),
        }
    }

    /// Parse a path produced by [`Route::path`]. The root path is not a route
    /// of its own; use [`landing`] for it.
    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/login" => Some(Self::Login),
            "/dashboard" => Some(Self::Dashboard),
            "/unauthorized" => Some(Self::Unauthorized),
            other => other
                .strip_prefix("/projects/")
                .and_then(|id| Uuid::parse_str(id).ok())
                .map(Self::ProjectDetail),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where the root path sends the user.
pub fn landing(session: &Session) -> Route {
    if session.is_authenticated {
        Route::Dashboard
    } else {
        Route::Login
    }
}

/// Resolve a navigation request against the session.
///
/// The login page is always reachable, but an authenticated user asking for
/// it is sent to the dashboard instead.
pub fn guard(session: &Session, requested: Route, required_role: Option<UserRole>) -> Route {
    if requested == Route::Login {
        return landing(session);
    }
    if !session.is_authenticated {
        return Route::Login;
    }

    let allowed = match (required_role, session.user.as_ref()) {
        (None, _) => true,
        (Some(required), Some(user)) => has_permission(user.role, required),
        (Some(_), None) => false,
    };

    if allowed {
        requested
    } else {
        Route::Unauthorized
    }
}

/// Where to go after a detail lookup. Missing projects fall back to the dashboard.
pub fn after_project_lookup<T>(id: Uuid, result: &Result<T, StoreError>) -> Route {
    match result {
        Ok(_) => Route::ProjectDetail(id),
        Err(_) => Route::Dashboard,
    }
}
