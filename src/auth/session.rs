use chrono::Utc;

use crate::db::LocalStorage;
use crate::models::{LoginResponse, Session, User, UserRole};

use super::credentials::MockAuthenticator;
use super::token::verify_token;
use super::{has_permission, AuthError};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the serialized [`User`].
pub const USER_KEY: &str = "user";

/// Owns the process-wide [`Session`] and mirrors it to local storage.
///
/// Storage is written on login, cleared on logout and read on restore.
pub struct SessionManager {
    storage: LocalStorage,
    authenticator: MockAuthenticator,
    session: Session,
    validate_on_restore: bool,
}

impl SessionManager {
    pub fn new(storage: LocalStorage, authenticator: MockAuthenticator) -> Self {
        Self {
            storage,
            authenticator,
            session: Session::default(),
            validate_on_restore: true,
        }
    }

    /// Whether [`restore`](Self::restore) checks the stored token's expiry.
    pub fn with_restore_validation(mut self, validate: bool) -> Self {
        self.validate_on_restore = validate;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    /// Log in and persist the credentials.
    ///
    /// On failure the session is left as it was (apart from `loading`).
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.session.loading = true;
        let result = self.authenticator.login(email, password).await;
        self.session.loading = false;

        match result {
            Ok(response) => {
                self.set_credentials(response)?;
                Ok(self.session.clone())
            }
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", email, e);
                Err(e)
            }
        }
    }

    /// Install an authenticated session and write it to storage.
    pub fn set_credentials(&mut self, response: LoginResponse) -> Result<(), AuthError> {
        let user_json = serde_json::to_string(&response.user).map_err(anyhow::Error::from)?;
        self.storage.set_item(TOKEN_KEY, &response.token)?;
        self.storage.set_item(USER_KEY, &user_json)?;

        tracing::info!(
            "Logged in as {} ({})",
            response.user.email,
            response.user.role.as_str()
        );
        self.session = Session::authenticated(response.user, response.token);
        Ok(())
    }

    /// Reinstate a session from storage.
    ///
    /// Returns `None` when nothing is stored. With restore validation on, an
    /// expired or undecodable token also yields `None` and the stale entries
    /// are removed.
    pub fn restore(&mut self) -> Result<Option<Session>, AuthError> {
        let token = self.storage.get_item(TOKEN_KEY)?;
        let user_json = self.storage.get_item(USER_KEY)?;

        let (Some(token), Some(user_json)) = (token, user_json) else {
            return Ok(None);
        };

        if self.validate_on_restore {
            if let Err(e) = verify_token(&token, Utc::now()) {
                tracing::info!("Discarding stored session: {}", e);
                self.clear_storage()?;
                return Ok(None);
            }
        }

        let user: User = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Stored user is unreadable, discarding session: {}", e);
                self.clear_storage()?;
                return Ok(None);
            }
        };

        tracing::debug!("Restored session for {}", user.email);
        self.session = Session::authenticated(user, token);
        Ok(Some(self.session.clone()))
    }

    /// Drop the session and its stored credentials.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.clear_storage()?;
        if let Some(user) = self.session.user.take() {
            tracing::info!("Logged out {}", user.email);
        }
        self.session = Session::default();
        Ok(())
    }

    /// Whether the logged-in user holds at least `required`.
    /// Always `false` when nobody is logged in.
    pub fn has_permission(&self, required: UserRole) -> bool {
        self.current_user()
            .is_some_and(|user| has_permission(user.role, required))
    }

    fn clear_storage(&self) -> Result<(), AuthError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        Ok(())
    }
}
