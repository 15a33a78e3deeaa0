use crate::helpers::{no_cb, spawn_app, spawn_unreachable_client};
use hr_client_core::{Client, ErrorKind, SessionManager, SlotStorage};
use hr_shared::{
    const_config::{
        error::ERR_MSG_SESSION_NOT_SAVED,
        navigation::{NAV_EMPLOYEES, NAV_HOME, NAV_LOGIN},
    },
    req_args::LoginReqArgs,
    uac::{Capability, ROLE_ADMIN},
};
use hr_test_helper::{
    subject_with_roles, RecordingNavigator, TEST_PASSWORD, TEST_TOKEN_ADMIN, TEST_USERNAME_ADMIN,
    TEST_USERNAME_HR,
};
use hr_time::{Seconds, Timestamp};
use std::{collections::BTreeMap, sync::Arc};

/// Keeps slots in memory but reports every write as failed
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    slots: BTreeMap<String, String>,
}

impl SlotStorage for ReadOnlyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set_all(&mut self, slots: &[(&str, String)]) -> anyhow::Result<()> {
        for (key, value) in slots {
            self.slots.insert(key.to_string(), value.clone());
        }
        anyhow::bail!("storage is read only")
    }

    fn remove_all(&mut self, keys: &[&str]) -> anyhow::Result<()> {
        for key in keys {
            self.slots.remove(*key);
        }
        Ok(())
    }
}

#[tokio::test]
async fn login_success_stores_credential() {
    // Arrange
    let app = spawn_app().await;
    assert!(!app.core_client.is_logged_in());

    // Act
    let outcome = app.login_admin().await;

    // Assert
    assert_eq!(outcome.landing_path, NAV_HOME);
    assert_eq!(outcome.subject.username.as_ref(), TEST_USERNAME_ADMIN);
    let session = app.core_client.session();
    assert!(session.is_authenticated());
    assert!(session.has_role(ROLE_ADMIN));
    assert_eq!(session.token().unwrap().expose(), TEST_TOKEN_ADMIN);
    assert!(app.core_client.capabilities().allows(Capability::ManageUsers));
    assert!(app.redirects().is_empty());
}

#[tokio::test]
async fn login_landing_depends_on_role() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app.login_as(TEST_USERNAME_HR).await;

    // Assert
    assert_eq!(outcome.landing_path, NAV_EMPLOYEES);
    assert!(!app.core_client.capabilities().allows(Capability::ManageUsers));
}

#[tokio::test]
async fn login_sends_no_bearer() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    app.login_admin().await;

    // Assert
    let requests = app.backend_log.requests_to("/auth/signIn");
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.authorization.is_none()));
}

#[tokio::test]
async fn login_failure_invalid_password() {
    // Arrange
    let app = spawn_app().await;
    let login_args = LoginReqArgs::new(TEST_USERNAME_ADMIN, "wrong-password".to_string().into());

    // Act
    let outcome = app.core_client.login(login_args, no_cb).await.unwrap();

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::BackendError);
    assert_eq!(error.message, "Username or password is incorrect");
    assert!(!app.core_client.is_logged_in());
    assert!(app.redirects().is_empty(), "a failed login is not an expiry");
}

#[tokio::test]
async fn login_fails_when_credential_not_saved() {
    // Arrange
    let app = spawn_app().await;
    let navigator = Arc::new(RecordingNavigator::default());
    let client = Client::new(
        app.address.clone(),
        SessionManager::new(ReadOnlyStorage::default()),
        navigator.clone(),
    );
    let login_args = LoginReqArgs::new(TEST_USERNAME_ADMIN, TEST_PASSWORD.to_string().into());

    // Act
    let outcome = client.login(login_args, no_cb).await.unwrap();

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::BackendError);
    assert_eq!(error.message, ERR_MSG_SESSION_NOT_SAVED);
    assert!(!client.is_logged_in());
    assert_eq!(client.session().token(), None, "partial write removed");
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn login_incomplete_args_not_sent() {
    // Arrange
    let app = spawn_app().await;
    let login_args = LoginReqArgs::new("  ", TEST_PASSWORD.to_string().into());

    // Act
    let outcome = app.core_client.login(login_args, no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::ValidationFailed);
    assert!(app.backend_log.requests_to("/auth/signIn").is_empty());
}

#[tokio::test]
async fn logout_notifies_backend_then_clears() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let rx = app.core_client.logout(no_cb);

    // Assert - Cleared before the backend replies
    assert!(!app.core_client.is_logged_in());
    assert_eq!(app.core_client.session().token(), None);
    assert_eq!(app.redirects(), vec![NAV_LOGIN]);

    // Assert - Backend was told using the old token
    assert!(rx.await.unwrap().is_ok());
    let requests = app.backend_log.requests_to("/auth/logout");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {TEST_TOKEN_ADMIN}").as_str())
    );
}

#[tokio::test]
async fn logout_clears_when_backend_unreachable() {
    // Arrange
    let (client, navigator) = spawn_unreachable_client();
    client
        .session()
        .save_credential(
            "abc".into(),
            &subject_with_roles(&[ROLE_ADMIN]),
            Timestamp::now() + Seconds::new(3600),
        )
        .unwrap();
    assert!(client.is_logged_in());

    // Act
    let outcome = client.logout(no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::ConnectivityError);
    assert!(!client.is_logged_in());
    assert_eq!(client.session().subject(), None);
    assert_eq!(navigator.redirects(), vec![NAV_LOGIN]);
}

#[tokio::test]
async fn logout_no_wait_clears_immediately() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    app.core_client.logout_no_wait();

    // Assert
    assert!(!app.core_client.is_logged_in());
    assert_eq!(app.redirects(), vec![NAV_LOGIN]);
}

#[tokio::test]
async fn logout_without_session_skips_backend() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app.core_client.logout(no_cb).await.unwrap();
    app.core_client.logout_no_wait();

    // Assert
    assert!(outcome.is_ok());
    assert_eq!(app.redirects(), vec![NAV_LOGIN, NAV_LOGIN]);
    assert!(app.backend_log.requests_to("/auth/logout").is_empty());
}

#[tokio::test]
async fn route_guard_redirects_after_logout() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    assert!(app.core_client.guard_route(NAV_EMPLOYEES));

    // Act
    app.core_client.logout_no_wait();

    // Assert
    assert!(!app.core_client.guard_route(NAV_EMPLOYEES));
    assert_eq!(app.redirects(), vec![NAV_LOGIN, NAV_LOGIN]);
}
