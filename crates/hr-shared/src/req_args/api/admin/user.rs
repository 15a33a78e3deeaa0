use secrecy::SecretString;

use crate::{
    id::RecordId,
    uac::{DisplayName, Username},
};

#[derive(Debug, serde::Deserialize, Clone)]
pub struct NewUserReqArgs {
    pub username: Username,
    pub display_name: DisplayName,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    /// `yyyy-mm-dd`
    pub date_of_birth: String,
    pub password: SecretString,
    pub role_ids: Vec<RecordId>,
}

/// Only `Some` fields are sent
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserReqArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<DisplayName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<RecordId>>,
}

/// Uses the normalized polarity: `is_active == true` means the account can be
/// used. Converted to the backend's inverted `active` flag when serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStatusReqArgs {
    pub is_active: bool,
}

#[derive(Debug, serde::Deserialize, Clone)]
pub struct PasswordResetReqArgs {
    pub user_id: RecordId,
    pub new_password: SecretString,
}

impl serde::Serialize for UserStatusReqArgs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        struct Wire {
            active: bool,
        }
        Wire {
            active: !self.is_active,
        }
        .serialize(serializer)
    }
}
