use futures::channel::oneshot;
use hr_shared::{
    const_config::path::{
        PATH_AUTH_LOGOUT, PATH_PROFILE, PATH_PROFILE_CHANGE_PASSWORD, PATH_PROFILE_UPDATE,
    },
    req_args::api::{ChangePasswordReqArgs, UpdateProfileReqArgs},
    uac::UserRecord,
};
use secrecy::ExposeSecret as _;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    client::{reply, send_or_log, Auth, UiCallBack, NO_ARGS},
    envelope::{Envelope, Success},
    Client,
};

pub mod admin;
pub mod hr;

impl Client {
    /// Tells the backend the token is no longer used then ends the session
    ///
    /// The session is cleared and the host redirected before this returns,
    /// whatever the backend replies. The receiver only reports how the
    /// notification went. Without a stored token the backend is not contacted.
    #[tracing::instrument(skip(ui_notify))]
    pub fn logout<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<Envelope<Value>> {
        if self.session.token().is_none() {
            debug!("no token stored, backend not notified of logout");
            let (tx, rx) = oneshot::channel();
            self.end_session();
            send_or_log(tx, Ok(Success::new(Value::Null)));
            ui_notify();
            return rx;
        }
        // Request is built with the bearer before the session is cleared
        let rx = self.send_request(
            PATH_AUTH_LOGOUT.into(),
            NO_ARGS,
            Auth::BearerOnly,
            ui_notify,
            |status, body| {
                let msg = reply::reduce_reply(status, body);
                if let Err(e) = &msg {
                    warn!(?e, "backend did not accept logout");
                }
                msg
            },
        );
        self.end_session();
        rx
    }

    #[tracing::instrument]
    pub fn logout_no_wait(&self) {
        if self.session.token().is_some() {
            self.send_request_no_wait(PATH_AUTH_LOGOUT.into(), NO_ARGS, Auth::BearerOnly);
        }
        self.end_session();
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_profile<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        self.call(PATH_PROFILE, NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_profile<F: UiCallBack>(
        &self,
        args: &UpdateProfileReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        self.call(PATH_PROFILE_UPDATE, Some(args), ui_notify)
    }

    #[tracing::instrument(skip(args, ui_notify))]
    pub fn change_password<F: UiCallBack>(
        &self,
        args: &ChangePasswordReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        let args = serde_json::json!({
            "oldPassword": args.old_password.expose_secret(),
            "newPassword": args.new_password.expose_secret(),
        });
        self.call(PATH_PROFILE_CHANGE_PASSWORD, Some(&args), ui_notify)
    }
}
