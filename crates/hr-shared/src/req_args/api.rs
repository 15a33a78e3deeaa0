use secrecy::SecretString;

use crate::uac::DisplayName;

pub mod admin;
pub mod hr;

#[derive(serde::Deserialize)]
pub struct ChangePasswordReqArgs {
    pub old_password: SecretString,
    pub new_password: SecretString,
}

/// Only `Some` fields are sent
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileReqArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<DisplayName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// `yyyy-mm-dd`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}
