use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::{errors::ConversionError, id::RecordId};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_HR_MANAGER: &str = "HR_MANAGER";
pub const ROLE_PAYROLL_MANAGER: &str = "PAYROLL_MANAGER";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "RoleRef")]
pub struct RoleName(String);

/// Backends send roles either as a bare name or as a full role object
#[derive(Deserialize)]
#[serde(untagged)]
enum RoleRef {
    Name(String),
    Record { name: String },
}

/// Role as listed by the role management endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub id: RecordId,
    pub name: RoleName,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoleName {
    pub const MAX_LENGTH: usize = 50;
}

impl TryFrom<String> for RoleName {
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

impl TryFrom<&str> for RoleName {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl TryFrom<RoleRef> for RoleName {
    type Error = ConversionError;

    fn try_from(value: RoleRef) -> Result<Self, Self::Error> {
        match value {
            RoleRef::Name(name) | RoleRef::Record { name } => name.try_into(),
        }
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Deref for RoleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0[..]
    }
}

impl PartialEq<str> for RoleName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
