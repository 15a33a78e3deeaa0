use futures::channel::oneshot;
use hr_shared::{
    const_config::path::PATH_USERS,
    id::RecordId,
    req_args::{
        api::admin::user::{
            AdminUpdateUserReqArgs, NewUserReqArgs, PasswordResetReqArgs, UserStatusReqArgs,
        },
        PageReqArgs,
    },
    uac::UserRecord,
};
use reqwest::Method;
use secrecy::ExposeSecret as _;
use serde_json::Value;

use crate::{
    client::{UiCallBack, NO_ARGS},
    envelope::Envelope,
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_users<F: UiCallBack>(
        &self,
        page: PageReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<UserRecord>>> {
        self.call_list(PATH_USERS, Some(&page), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn new_user<F: UiCallBack>(
        &self,
        user: NewUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        let args = serde_json::json!({
            "userName": user.username,
            "fullName": user.display_name,
            "email": user.email,
            "phone": user.phone,
            "address": user.address,
            "dateOfBirth": user.date_of_birth,
            "password": user.password.expose_secret(),
            "roles": user.role_ids,
        });
        self.call(PATH_USERS.with_method(Method::POST), Some(&args), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user<F: UiCallBack>(
        &self,
        user_id: RecordId,
        args: &AdminUpdateUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        self.call(
            PATH_USERS.join(user_id).method(Method::PUT),
            Some(args),
            ui_notify,
        )
    }

    /// Locks or unlocks an account
    #[tracing::instrument(skip(ui_notify))]
    pub fn set_user_status<F: UiCallBack>(
        &self,
        user_id: RecordId,
        args: UserStatusReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        self.call(
            PATH_USERS.join(user_id).join("status").method(Method::PUT),
            Some(&args),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_user<F: UiCallBack>(
        &self,
        user_id: RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Value>> {
        self.call(
            PATH_USERS.join(user_id).method(Method::DELETE),
            NO_ARGS,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(args, ui_notify), fields(user_id = %args.user_id))]
    pub fn reset_password<F: UiCallBack>(
        &self,
        args: PasswordResetReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<UserRecord>> {
        let body = serde_json::json!({
            "password": args.new_password.expose_secret(),
        });
        self.call(
            PATH_USERS
                .join(args.user_id)
                .join("reset-password")
                .method(Method::PUT),
            Some(&body),
            ui_notify,
        )
    }
}
