use std::time::Duration;

use project_dashboard::auth::{AuthError, MockAuthenticator, SessionManager, TOKEN_KEY, USER_KEY};
use project_dashboard::db::LocalStorage;
use project_dashboard::models::*;
use project_dashboard::routing::{self, Route};
use tempfile::TempDir;

fn setup() -> (TempDir, LocalStorage) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let storage = open(&dir);
    (dir, storage)
}

fn open(dir: &TempDir) -> LocalStorage {
    let storage = LocalStorage::open(dir.path().join("storage.db")).expect("Failed to open storage");
    storage.migrate().expect("Failed to migrate");
    storage
}

fn expiring_authenticator() -> MockAuthenticator {
    MockAuthenticator::new(Duration::ZERO, chrono::Duration::hours(-1))
}

mod login {
    use super::*;

    #[tokio::test]
    async fn admin_credentials_grant_the_admin_role() {
        let (_dir, storage) = setup();
        let mut manager = SessionManager::new(storage.clone(), MockAuthenticator::instant());

        let session = manager
            .login("admin@example.com", "admin123")
            .await
            .expect("Login failed");

        assert!(session.is_authenticated);
        assert!(!session.loading);
        assert_eq!(session.user.as_ref().unwrap().role, UserRole::Admin);
        assert!(manager.has_permission(UserRole::ProjectManager));
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_some());
        assert!(storage.get_item(USER_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn wrong_password_leaves_the_session_anonymous() {
        let (_dir, storage) = setup();
        let mut manager = SessionManager::new(storage.clone(), MockAuthenticator::instant());

        let result = manager.login("admin@example.com", "wrong").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(!manager.is_authenticated());
        assert!(manager.current_user().is_none());
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn developer_cannot_reach_manager_routes() {
        let (_dir, storage) = setup();
        let mut manager = SessionManager::new(storage, MockAuthenticator::instant());
        manager.login("dev@example.com", "dev123").await.expect("Login failed");

        assert!(!manager.has_permission(UserRole::ProjectManager));
        assert_eq!(
            routing::guard(manager.session(), Route::Dashboard, Some(UserRole::ProjectManager)),
            Route::Unauthorized
        );
        assert_eq!(routing::landing(manager.session()), Route::Dashboard);
    }
}

mod restore {
    use super::*;

    #[tokio::test]
    async fn a_new_process_picks_up_the_stored_session() {
        let (dir, storage) = setup();
        let mut first = SessionManager::new(storage, MockAuthenticator::instant());
        first.login("pm@example.com", "project123").await.expect("Login failed");
        drop(first);

        let mut second = SessionManager::new(open(&dir), MockAuthenticator::instant());
        let restored = second.restore().expect("Restore failed").expect("No session");

        assert!(restored.is_authenticated);
        assert_eq!(restored.user.unwrap().email, "pm@example.com");
        assert_eq!(second.current_user().unwrap().role, UserRole::ProjectManager);
    }

    #[tokio::test]
    async fn nothing_stored_means_no_session() {
        let (_dir, storage) = setup();
        let mut manager = SessionManager::new(storage, MockAuthenticator::instant());

        assert!(manager.restore().expect("Restore failed").is_none());
        assert_eq!(routing::landing(manager.session()), Route::Login);
    }

    #[tokio::test]
    async fn expired_tokens_are_discarded() {
        let (_dir, storage) = setup();
        let mut first = SessionManager::new(storage.clone(), expiring_authenticator());
        first.login("dev@example.com", "dev123").await.expect("Login failed");

        let mut second = SessionManager::new(storage.clone(), MockAuthenticator::instant());
        assert!(second.restore().expect("Restore failed").is_none());
        assert!(!second.is_authenticated());
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
        assert!(storage.get_item(USER_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_tokens_survive_when_validation_is_off() {
        let (_dir, storage) = setup();
        let mut first = SessionManager::new(storage.clone(), expiring_authenticator());
        first.login("dev@example.com", "dev123").await.expect("Login failed");

        let mut second = SessionManager::new(storage, MockAuthenticator::instant())
            .with_restore_validation(false);
        let restored = second.restore().expect("Restore failed");

        assert!(restored.is_some());
        assert!(second.is_authenticated());
    }

    #[tokio::test]
    async fn unreadable_user_is_discarded() {
        let (_dir, storage) = setup();
        let mut first = SessionManager::new(storage.clone(), MockAuthenticator::instant());
        first.login("dev@example.com", "dev123").await.expect("Login failed");
        storage.set_item(USER_KEY, "{not json").unwrap();

        let mut second = SessionManager::new(storage.clone(), MockAuthenticator::instant());
        assert!(second.restore().expect("Restore failed").is_none());
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn clears_state_and_storage() {
        let (_dir, storage) = setup();
        let mut manager = SessionManager::new(storage.clone(), MockAuthenticator::instant());
        manager.login("admin@example.com", "admin123").await.expect("Login failed");

        manager.logout().expect("Logout failed");

        assert_eq!(manager.session(), &Session::default());
        assert!(!manager.has_permission(UserRole::Developer));
        assert!(storage.get_item(TOKEN_KEY).unwrap().is_none());
        assert!(storage.get_item(USER_KEY).unwrap().is_none());
        assert_eq!(
            routing::guard(manager.session(), Route::Dashboard, None),
            Route::Login
        );
    }
}
