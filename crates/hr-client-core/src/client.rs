use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use hr_shared::{
    const_config::{
        client::CLIENT_DEFAULT_BASE_URL,
        navigation::NAV_LOGIN,
        path::{Endpoint, PATH_AUTH_LOGIN, PATH_HEALTH_CHECK},
    },
    req_args::LoginReqArgs,
    responses::SignInResponse,
    uac::{Capabilities, Subject},
};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret as _;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};
use tracing::{debug, error, info, warn};

use crate::{
    envelope::{ApiError, Envelope, ErrorKind, Success},
    navigation::{self, landing_path, Navigator, TracingNavigator},
    SessionManager,
};

pub mod api;
mod reply;

/// Use when a request has no arguments
pub const NO_ARGS: Option<&()> = None;

const ERR_MSG_LOGIN_INCOMPLETE: &str = "username and password are required";

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
    session: SessionManager,
    navigator: Arc<dyn Navigator>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
}

/// How a request relates to the stored session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Bearer attached if a token is stored. A 401 ends the session
    Session,
    /// Bearer attached if a token is stored. A 401 is only reported
    BearerOnly,
    /// Never attach a bearer
    Anonymous,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub subject: Subject,
    /// Where the user should be sent based on their roles
    pub landing_path: &'static str,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_address(CLIENT_DEFAULT_BASE_URL.to_string())
    }
}

impl ClientInner {
    #[tracing::instrument]
    fn new(server_address: String) -> Self {
        Self {
            server_address: server_address.trim_end_matches('/').to_string(),
        }
    }
}

impl Client {
    #[tracing::instrument(skip(session, navigator))]
    pub fn new(
        server_address: String,
        session: SessionManager,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api_client: reqwest::Client::new(),
            inner: Arc::new(Mutex::new(ClientInner::new(server_address))),
            session,
            navigator,
        }
    }

    /// Session kept in memory and redirects only traced
    pub fn with_address(server_address: String) -> Self {
        Self::new(
            server_address,
            SessionManager::in_memory(),
            Arc::new(TracingNavigator),
        )
    }

    /// Signs in and on success stores the credential returned
    ///
    /// Incomplete arguments are rejected without contacting the backend.
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<LoginOutcome>> {
        if !args.is_complete() {
            let (tx, rx) = oneshot::channel();
            let msg = Err(ApiError::new(
                ErrorKind::ValidationFailed,
                ERR_MSG_LOGIN_INCOMPLETE,
            ));
            send_or_log(tx, msg);
            ui_notify();
            return rx;
        }
        let args = serde_json::json!({
            "userName": args.username.trim(),
            "password": args.password.expose_secret(),
        });
        let session = self.session.clone();
        self.send_request(
            PATH_AUTH_LOGIN.into(),
            Some(&args),
            Auth::Anonymous,
            ui_notify,
            move |status, body| {
                let Success {
                    payload,
                    page_info,
                    message,
                    correlation_id,
                } = reply::reduce_login_reply(status, body)?;
                let outcome = store_sign_in(&session, payload)
                    .map_err(|e| e.correlation_id(correlation_id.clone()))?;
                Ok(Success {
                    payload: outcome,
                    page_info,
                    message,
                    correlation_id,
                })
            },
        )
    }

    /// Succeeds on any 2xx reply, the body is not inspected
    #[tracing::instrument(skip(ui_notify))]
    pub fn health_check<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<Envelope<()>> {
        self.send_request(
            PATH_HEALTH_CHECK.into(),
            NO_ARGS,
            Auth::Anonymous,
            ui_notify,
            |status, body| {
                if status.is_success() {
                    Ok(Success::new(()))
                } else {
                    reply::reduce_reply(status, body)
                }
            },
        )
    }

    /// Sends a request and expects the payload to deserialize into `U`
    ///
    /// GET arguments are sent as the query string, POST, PUT and PATCH
    /// arguments as a JSON body, and other methods send no arguments
    pub fn call<T, U, F>(
        &self,
        endpoint: impl Into<Endpoint>,
        args: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        T: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.send_request(
            endpoint.into(),
            args,
            Auth::Session,
            ui_notify,
            reply::reduce_reply::<U>,
        )
    }

    /// Like [`Self::call`] but accepts every list shape the
    /// backends produce and collects the pagination
    pub fn call_list<T, U, F>(
        &self,
        endpoint: impl Into<Endpoint>,
        args: Option<&T>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        T: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.send_request(
            endpoint.into(),
            args,
            Auth::Session,
            ui_notify,
            reply::reduce_list_reply::<U>,
        )
    }

    fn send_request<T, U, F, R>(
        &self,
        endpoint: Endpoint,
        args: Option<&T>,
        auth: Auth,
        ui_notify: F,
        reduce: R,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        T: Serialize + ?Sized,
        U: Send + 'static,
        F: UiCallBack,
        R: 'static + Send + FnOnce(StatusCode, &str) -> Envelope<U>,
    {
        let (tx, rx) = oneshot::channel();
        let ends_session = (auth == Auth::Session)
            .then(|| (self.session.clone(), Arc::clone(&self.navigator)));
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_reply(resp, reduce).await;
            if let (Err(e), Some((session, navigator))) = (&msg, ends_session) {
                if e.is_auth_expired() {
                    end_session(&session, navigator.as_ref());
                }
            }
            send_or_log(tx, msg);
            ui_notify();
        };
        self.initiate_request(endpoint, args, auth, on_done);
        rx
    }

    fn send_request_no_wait<T>(&self, endpoint: Endpoint, args: Option<&T>, auth: Auth)
    where
        T: Serialize + ?Sized,
    {
        self.initiate_request(endpoint, args, auth, |resp| async move {
            match resp {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => warn!(status = %resp.status(), "request without wait was rejected"),
                Err(e) => warn!(?e, "request without wait failed"),
            }
        });
    }

    #[tracing::instrument(skip(self, args, on_done))]
    // WARNING: Must skip args as they may contain passwords
    fn initiate_request<T, F, O>(
        &self,
        endpoint: Endpoint,
        args: Option<&T>,
        auth: Auth,
        on_done: F,
    ) where
        T: Serialize + ?Sized,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let mut request = self
            .api_client
            .request(endpoint.method.clone(), self.path_to_url(&endpoint.path));
        if auth != Auth::Anonymous {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token.expose());
            }
        }
        if let Some(args) = args {
            if endpoint.has_body() {
                request = request.json(args);
            } else if endpoint.method == Method::GET {
                request = request.query(args);
            } else {
                debug!(method = %endpoint.method, "arguments not sent for this method");
            }
        }
        reqwest_cross::fetch(request, on_done)
    }

    #[tracing::instrument(ret, skip(self))]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }

    pub fn server_address(&self) -> String {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .server_address
            .clone()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn subject(&self) -> Option<Subject> {
        self.session.subject()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.session.capabilities()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_valid()
    }

    /// Redirects to the login page and returns false if `current_path` may
    /// not be shown with the current session
    #[tracing::instrument(skip(self))]
    pub fn guard_route(&self, current_path: &str) -> bool {
        match navigation::route_guard(&self.session, current_path) {
            Some(redirect_to) => {
                self.navigator.redirect(redirect_to);
                false
            }
            None => true,
        }
    }

    fn end_session(&self) {
        end_session(&self.session, self.navigator.as_ref());
    }
}

fn end_session(session: &SessionManager, navigator: &dyn Navigator) {
    session.clear();
    navigator.redirect(NAV_LOGIN);
}

/// Login only succeeds once the credential is stored. A partial write is
/// removed again
fn store_sign_in(
    session: &SessionManager,
    signed_in: SignInResponse,
) -> Result<LoginOutcome, ApiError> {
    let SignInResponse {
        token,
        expired_date,
        user,
    } = signed_in;
    if let Err(e) = session.save_credential(token, &user, expired_date) {
        error!(?e, username = %user.username, "signed in but credential was not saved");
        session.clear();
        return Err(ApiError::session_not_saved());
    }
    info!(username = %user.username, %expired_date, "logged in");
    Ok(LoginOutcome {
        landing_path: landing_path(&user),
        subject: user,
    })
}

fn send_or_log<T>(tx: oneshot::Sender<T>, msg: T) {
    if tx.send(msg).is_err() {
        debug!("receiver dropped before the reply was delivered");
    }
}

#[tracing::instrument(skip(response, reduce))]
async fn process_reply<U, R>(response: reqwest::Result<reqwest::Response>, reduce: R) -> Envelope<U>
where
    R: FnOnce(StatusCode, &str) -> Envelope<U>,
{
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            warn!(?e, "request failed to complete");
            return Err(ApiError::connectivity());
        }
    };
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) if status.is_success() => {
            warn!(?e, %status, "failed to read reply body");
            return Err(ApiError::connectivity().status(status.as_u16()));
        }
        Err(e) => {
            debug!(?e, %status, "failed to read error body");
            String::new()
        }
    };
    let msg = reduce(status, &body);
    if let Err(e) = &msg {
        info!(kind = %e.kind, code = ?e.code, message = %e.message, "request unsuccessful");
    }
    msg
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
