use std::time::Duration;

use crate::models::{LoginResponse, User, UserRole};

use super::token::generate_token;
use super::AuthError;

/// Simulated round-trip of the mock login.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(500);

struct Credential {
    id: &'static str,
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: UserRole,
}

impl Credential {
    fn to_user(&self) -> User {
        User {
            id: self.id.to_string(),
            email: self.email.to_string(),
            name: self.name.to_string(),
            role: self.role,
        }
    }
}

const CREDENTIALS: &[Credential] = &[
    Credential {
        id: "1",
        email: "admin@example.com",
        password: "admin123",
        name: "Admin User",
        role: UserRole::Admin,
    },
    Credential {
        id: "2",
        email: "pm@example.com",
        password: "project123",
        name: "Project Manager",
        role: UserRole::ProjectManager,
    },
    Credential {
        id: "3",
        email: "dev@example.com",
        password: "dev123",
        name: "Developer User",
        role: UserRole::Developer,
    },
];

/// Login against the fixed credential table.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
    token_ttl: chrono::Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration, token_ttl: chrono::Duration) -> Self {
        Self { delay, token_ttl }
    }

    /// No simulated latency. Used by tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, chrono::Duration::hours(24))
    }

    /// Exact (email, password) match after the simulated delay.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let user = CREDENTIALS
            .iter()
            .find(|c| c.email == email && c.password == password)
            .map(Credential::to_user)
            .ok_or(AuthError::InvalidCredentials)?;

        let token = generate_token(&user, self.token_ttl);
        Ok(LoginResponse { user, token })
    }

    /// Users known to the credential table, without passwords.
    pub fn known_users() -> Vec<User> {
        CREDENTIALS.iter().map(Credential::to_user).collect()
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY, chrono::Duration::hours(24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::decode_token;

    #[tokio::test]
    async fn admin_login_succeeds() {
        let response = MockAuthenticator::instant()
            .login("admin@example.com", "admin123")
            .await
            .unwrap();

        assert_eq!(response.user.role, UserRole::Admin);
        assert_eq!(response.user.name, "Admin User");
        let claims = decode_token(&response.token).unwrap();
        assert_eq!(claims.id, "1");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let result = MockAuthenticator::instant()
            .login("admin@example.com", "wrong")
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn email_match_is_exact() {
        let result = MockAuthenticator::instant()
            .login("Admin@Example.com", "admin123")
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn known_users_cover_every_role() {
        let users = MockAuthenticator::known_users();
        for role in UserRole::ALL {
            assert!(users.iter().any(|u| u.role == role));
        }
    }
}
