use crate::helpers::{no_cb, spawn_app, spawn_unreachable_client};
use hr_client_core::{Client, Envelope, ErrorKind, NO_ARGS};
use hr_shared::{
    const_config::{
        error::{ERR_CODE_FORBIDDEN, ERR_CODE_HTTP, ERR_MSG_CONNECTIVITY, ERR_MSG_MALFORMED},
        navigation::NAV_LOGIN,
        path::PathSpec,
    },
    req_args::PageReqArgs,
    uac::{ROLE_ADMIN, ROLE_HR_MANAGER},
};
use hr_test_helper::TEST_TOKEN_ADMIN;
use serde_json::{json, Value};
use std::time::Duration;

const ECHO_GET: PathSpec = PathSpec::get("/echo");
const ECHO_POST: PathSpec = PathSpec::post("/echo");
const ECHO_DELETE: PathSpec = PathSpec::delete("/echo");

async fn fetch_value(client: &Client, endpoint: PathSpec) -> Envelope<Value> {
    client
        .call(endpoint, NO_ARGS, no_cb)
        .await
        .expect("reply not received")
}

#[tokio::test]
async fn no_bearer_without_session() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = fetch_value(&app.core_client, ECHO_GET).await;

    // Assert
    assert_eq!(outcome.unwrap().payload["authorization"], Value::Null);
}

#[tokio::test]
async fn bearer_attached_with_session() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = fetch_value(&app.core_client, ECHO_GET).await;

    // Assert
    assert_eq!(
        outcome.unwrap().payload["authorization"],
        json!(format!("Bearer {TEST_TOKEN_ADMIN}"))
    );
}

#[tokio::test]
async fn expired_token_still_presented() {
    // Arrange
    let app = spawn_app().await;
    app.store_expired_credential("stale-token", &[ROLE_ADMIN]);
    assert!(!app.core_client.is_logged_in());

    // Act
    let outcome = fetch_value(&app.core_client, ECHO_GET).await;

    // Assert - The backend decides, not the client
    assert_eq!(
        outcome.unwrap().payload["authorization"],
        json!("Bearer stale-token")
    );
}

#[tokio::test]
async fn rejected_token_ends_session() {
    // Arrange
    let app = spawn_app().await;
    app.store_expired_credential("stale-token", &[ROLE_HR_MANAGER]);

    // Act
    let outcome = app.core_client.get_profile(no_cb).await.unwrap();

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::AuthExpired);
    assert_eq!(error.status, Some(401));
    assert_eq!(app.core_client.session().token(), None);
    assert_eq!(app.core_client.subject(), None);
    assert_eq!(app.redirects(), vec![NAV_LOGIN]);
}

#[tokio::test]
async fn any_401_is_session_expiry() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/status/401")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert!(error.is_auth_expired());
    assert_eq!(error.message, "session expired");
    assert!(!app.core_client.is_logged_in());
    assert_eq!(app.redirects(), vec![NAV_LOGIN]);
}

#[tokio::test]
async fn concurrent_401s_leave_session_cleared() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let expired = PathSpec::get("/status/401");

    // Act
    let (first, second) = futures::join!(
        fetch_value(&app.core_client, expired.clone()),
        fetch_value(&app.core_client, expired),
    );

    // Assert
    assert!(first.unwrap_err().is_auth_expired());
    assert!(second.unwrap_err().is_auth_expired());
    assert!(!app.core_client.is_logged_in());
    assert!(app.redirects().iter().all(|path| path == NAV_LOGIN));
    assert!(!app.redirects().is_empty());
}

#[tokio::test]
async fn forbidden_keeps_session() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/reply/forbidden")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Forbidden);
    assert_eq!(error.code.as_deref(), Some(ERR_CODE_FORBIDDEN));
    assert!(app.core_client.is_logged_in());
    assert!(app.redirects().is_empty());
}

#[tokio::test]
async fn success_status_with_failure_body_is_error() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/reply/ok-false")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::BackendError);
    assert_eq!(error.message, "X");
    assert_eq!(error.code.as_deref(), Some("ERR"));
    assert_eq!(error.status, Some(200));
}

#[tokio::test]
async fn validation_details_flattened() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let employee = json!({"full_name": "", "email": "not-an-email"});

    // Act
    let outcome: Envelope<Value> = app
        .core_client
        .employees()
        .create(&employee, no_cb)
        .await
        .unwrap();

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::ValidationFailed);
    assert_eq!(error.message, "email: invalid, full_name: required");
    assert_eq!(error.field_errors.as_ref().map(Vec::len), Some(2));
    assert_eq!(error.correlation_id.as_deref(), Some("trace-employee-1"));
    assert_eq!(
        error.user_message(),
        "email: invalid, full_name: required (trace id: trace-employee-1)"
    );
}

#[tokio::test]
async fn domain_and_map_details_in_message() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/reply/missing")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::BackendError);
    assert_eq!(error.message, "[stub] no such reply\nname: missing");
    assert_eq!(error.status, Some(404));
}

#[tokio::test]
async fn non_envelope_error_uses_raw_text() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/reply/plain-text")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::BackendError);
    assert_eq!(error.message, "upstream unavailable");
    assert_eq!(error.code.as_deref(), Some(ERR_CODE_HTTP));
    assert_eq!(error.status, Some(502));
}

#[tokio::test]
async fn empty_error_body_uses_status_line() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/status/500")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.message, "500 Internal Server Error");
    assert_eq!(error.code.as_deref(), Some(ERR_CODE_HTTP));
}

#[tokio::test]
async fn unparsable_success_body_is_malformed() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = fetch_value(&app.core_client, PathSpec::get("/reply/not-json")).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::ConnectivityError);
    assert_eq!(error.message, ERR_MSG_MALFORMED);
}

#[tokio::test]
async fn empty_success_body_accepted_when_nothing_expected() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome: Envelope<()> = app
        .core_client
        .call(PathSpec::get("/status/204"), NO_ARGS, no_cb)
        .await
        .unwrap();

    // Assert
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn unreachable_backend_is_connectivity_error() {
    // Arrange
    let (client, navigator) = spawn_unreachable_client();

    // Act
    let outcome = fetch_value(&client, ECHO_GET).await;

    // Assert
    let error = outcome.unwrap_err();
    assert_eq!(error.kind, ErrorKind::ConnectivityError);
    assert_eq!(error.message, ERR_MSG_CONNECTIVITY);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn get_arguments_sent_as_query() {
    // Arrange
    let app = spawn_app().await;
    let args = PageReqArgs::new(2, 5);

    // Act
    let outcome: Envelope<Value> = app
        .core_client
        .call(ECHO_GET, Some(&args), no_cb)
        .await
        .unwrap();

    // Assert
    let payload = outcome.unwrap().payload;
    assert_eq!(payload["method"], json!("GET"));
    assert_eq!(payload["query"], json!("page=2&size=5"));
    assert_eq!(payload["body"], json!(""));
}

#[tokio::test]
async fn post_arguments_sent_as_json_body() {
    // Arrange
    let app = spawn_app().await;
    let args = json!({"name": "Finance"});

    // Act
    let outcome: Envelope<Value> = app
        .core_client
        .call(ECHO_POST, Some(&args), no_cb)
        .await
        .unwrap();

    // Assert
    let payload = outcome.unwrap().payload;
    assert_eq!(payload["method"], json!("POST"));
    assert_eq!(payload["contentType"], json!("application/json"));
    let body: Value = serde_json::from_str(payload["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, args);
}

#[tokio::test]
async fn delete_sends_no_arguments() {
    // Arrange
    let app = spawn_app().await;
    let args = json!({"ignored": true});

    // Act
    let outcome: Envelope<Value> = app
        .core_client
        .call(ECHO_DELETE, Some(&args), no_cb)
        .await
        .unwrap();

    // Assert
    let payload = outcome.unwrap().payload;
    assert_eq!(payload["method"], json!("DELETE"));
    assert_eq!(payload["query"], json!(""));
    assert_eq!(payload["body"], json!(""));
}

#[tokio::test]
async fn concurrent_calls_settle_independently() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let (unreachable, _navigator) = spawn_unreachable_client();

    // Act
    let (echo, health, offline) = futures::join!(
        fetch_value(&app.core_client, ECHO_GET),
        app.core_client.health_check(no_cb),
        fetch_value(&unreachable, ECHO_GET),
    );

    // Assert
    assert!(echo.is_ok());
    assert!(health.unwrap().is_ok());
    assert_eq!(offline.unwrap_err().kind, ErrorKind::ConnectivityError);
    assert!(app.core_client.is_logged_in());
}

#[tokio::test]
async fn health_check_needs_no_session() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app.core_client.health_check(no_cb).await.unwrap();

    // Assert
    assert!(outcome.is_ok());
    let requests = app.backend_log.requests_to("/api/v1/health");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization, None);
}

#[tokio::test]
async fn ui_notified_after_reply() {
    // Arrange
    let app = spawn_app().await;
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();

    // Act
    let outcome = app
        .core_client
        .health_check(move || notify_tx.send(()).unwrap())
        .await
        .unwrap();

    // Assert
    assert!(outcome.is_ok());
    assert!(notify_rx.recv_timeout(Duration::from_secs(1)).is_ok());
}
