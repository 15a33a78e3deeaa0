#![warn(unused_crate_dependencies)]

use hr_client_core::{Client, LoginOutcome, Navigator, SessionManager};
use hr_shared::{
    req_args::LoginReqArgs,
    telemetry::{init_tracing, TraceSink},
    uac::Subject,
};
use hr_time::{Seconds, Timestamp};
use std::{
    fmt::Debug,
    net::TcpListener,
    sync::{Arc, LazyLock, Mutex},
};

mod stub_backend;

pub use stub_backend::{
    build_stub_backend, RecordedRequest, RequestLog, TEST_PASSWORD, TEST_TOKEN_ADMIN,
    TEST_TOKEN_HR, TEST_USERNAME_ADMIN, TEST_USERNAME_HR,
};

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let sink = if std::env::var("TEST_LOG").is_ok() {
        TraceSink::File
    } else {
        TraceSink::Discard
    };
    match init_tracing("test", "info", sink).unwrap() {
        Some(path) => format!("Traces for tests being written to: {path:?}"),
        None => format!("Traces set to {sink:?}"),
    }
});

/// Remembers every redirect requested instead of navigating
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects
            .lock()
            .expect("mutex poisoned")
            .push(path.to_string());
    }
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().expect("mutex poisoned").clone()
    }
}

pub struct TestApp {
    pub address: String,
    pub core_client: Client,
    pub navigator: Arc<RecordingNavigator>,
    pub backend_log: RequestLog,
}

impl Debug for TestApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestApp")
            .field("address", &self.address)
            .finish()
    }
}

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

pub fn port_to_test_address(port: u16) -> String {
    format!("http://127.0.0.1:{port}")
}

/// Address nothing is listening on
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().expect("failed to get address").port();
    drop(listener);
    port_to_test_address(port)
}

/// Client with an in memory session and a recording navigator
pub fn build_client(address: String) -> (Client, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let client = Client::new(address, SessionManager::in_memory(), navigator.clone());
    (client, navigator)
}

/// Starts a stub backend and returns a client pointed at it. Must be called
/// from inside a tokio runtime
pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);
    let backend_log = RequestLog::default();
    let (server, port) =
        build_stub_backend(backend_log.clone()).expect("failed to build stub backend");
    tokio::spawn(server);
    let address = port_to_test_address(port);
    let (core_client, navigator) = build_client(address.clone());
    TestApp {
        address,
        core_client,
        navigator,
        backend_log,
    }
}

pub fn subject_with_roles(roles: &[&str]) -> Subject {
    serde_json::from_value(serde_json::json!({
        "userName": "tester",
        "roles": roles,
    }))
    .expect("failed to build subject")
}

impl TestApp {
    pub async fn login_as(&self, username: &str) -> LoginOutcome {
        let args = LoginReqArgs::new(username, TEST_PASSWORD.to_string().into());
        self.core_client
            .login(args, no_cb)
            .await
            .expect("login reply not received")
            .expect("login failed")
            .payload
    }

    pub async fn login_admin(&self) -> LoginOutcome {
        self.login_as(TEST_USERNAME_ADMIN).await
    }

    /// Stores a credential that expired a minute ago without asking the backend
    pub fn store_expired_credential(&self, token: &str, roles: &[&str]) {
        self.core_client
            .session()
            .save_credential(
                token.into(),
                &subject_with_roles(roles),
                Timestamp::now() - Seconds::new(60),
            )
            .expect("failed to store credential");
    }

    pub fn redirects(&self) -> Vec<String> {
        self.navigator.redirects()
    }
}
