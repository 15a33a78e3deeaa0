use futures::channel::oneshot;
use hr_shared::{
    const_config::path::PATH_ROLES,
    uac::{RoleName, RoleRecord},
};
use reqwest::Method;

use crate::{
    client::{UiCallBack, NO_ARGS},
    envelope::Envelope,
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_roles<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<RoleRecord>>> {
        self.call_list(PATH_ROLES, NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_role<F: UiCallBack>(
        &self,
        name: RoleName,
        description: Option<String>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<RoleRecord>> {
        let args = serde_json::json!({
            "name": name,
            "description": description,
        });
        self.call(PATH_ROLES.with_method(Method::POST), Some(&args), ui_notify)
    }
}
