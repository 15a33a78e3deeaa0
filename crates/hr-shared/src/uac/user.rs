use std::fmt::Display;

use crate::{errors::ConversionError, id::RecordId};

use super::RoleName;

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String")]
/// Represents a login name and is constrained to not be an empty string
pub struct Username(String);

#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct DisplayName(String);

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        let length = value.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let length = value.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for DisplayName {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl Username {
    pub const MAX_LENGTH: usize = 50;
}

impl DisplayName {
    pub const MAX_LENGTH: usize = 100;
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated user as known to the client. Stored alongside the token
/// and used for role gating only, the backend remains the authority
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Subject {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "userName", alias = "username")]
    pub username: Username,
    #[serde(rename = "fullName", alias = "display_name", default)]
    pub display_name: Option<DisplayName>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleName>,
}

impl Subject {
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role == name)
    }

    pub fn has_any_role(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_role(name))
    }

    /// Name to show the user, falls back to the login name
    pub fn greeting_name(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.0.is_empty() => &name.0,
            _ => self.username.as_ref(),
        }
    }
}

/// A user account as shown on the management screens
///
/// The account backend sends a flag named `active` that is `true` when the
/// account is LOCKED. It is converted on ingress so `is_active == true` always
/// means the account can be used.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "UserRecordWire", into = "UserRecordWire")]
pub struct UserRecord {
    pub id: RecordId,
    pub username: Username,
    pub display_name: Option<DisplayName>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub created_at: Option<String>,
    pub is_active: bool,
    pub roles: Vec<RoleName>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct UserRecordWire {
    id: RecordId,
    user_name: Username,
    #[serde(default)]
    full_name: Option<DisplayName>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    date_of_birth: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    /// `true` means locked
    #[serde(default)]
    active: bool,
    #[serde(default)]
    roles: Vec<RoleName>,
}

impl From<UserRecordWire> for UserRecord {
    fn from(value: UserRecordWire) -> Self {
        Self {
            id: value.id,
            username: value.user_name,
            display_name: value.full_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            date_of_birth: value.date_of_birth,
            created_at: value.created_at,
            is_active: !value.active,
            roles: value.roles,
        }
    }
}

impl From<UserRecord> for UserRecordWire {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id,
            user_name: value.username,
            full_name: value.display_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            date_of_birth: value.date_of_birth,
            created_at: value.created_at,
            active: !value.is_active,
            roles: value.roles,
        }
    }
}
