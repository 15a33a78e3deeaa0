//! Shapes of the replies sent by the backends
//!
//! Both backends wrap every reply in the same envelope. A reply is a success
//! iff `code == "OK"` or `operationType == "Success"`, regardless of the HTTP
//! status it arrived with.

use hr_time::Timestamp;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::Value;
use std::fmt::Display;

use crate::{token::AuthToken, uac::Subject};

pub const SUCCESS_CODE: &str = "OK";
pub const SUCCESS_OPERATION: &str = "Success";

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    #[serde(default)]
    pub operation_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub details: Option<ErrorDetails>,
}

/// Pagination fields as they appear at the top level of the envelope
///
/// The envelope's own `size` is the number of items in `data` and is not
/// read as pagination.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(
        default,
        alias = "total_records",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    pub total_elements: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub total_pages: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub page_size: Option<u64>,
}

/// Pagination fields carried inside a list payload
///
/// Spring pages name the page index `number` and the page size `size`.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayloadPageInfo {
    #[serde(
        default,
        alias = "total_records",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    pub total_elements: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub total_pages: Option<u64>,
    #[serde(
        default,
        alias = "number",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    pub page: Option<u64>,
    #[serde(
        default,
        alias = "size",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    pub page_size: Option<u64>,
}

/// Extra information attached to an error reply
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// Validation errors, one per entry
    Entries(Vec<FieldError>),
    /// Free-form key/value information
    Map(serde_json::Map<String, Value>),
    Other(Value),
}

/// One entry of a validation error list
#[derive(Debug, serde::Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldError {
    Text(String),
    Field {
        #[serde(default)]
        field: Option<String>,
        message: String,
    },
    Other(Value),
}

/// List payloads arrive in one of three shapes depending on the endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    BareArray(Vec<T>),
    Paged {
        content: Vec<T>,
        #[serde(flatten)]
        page: PayloadPageInfo,
    },
    Wrapped {
        data: Vec<T>,
        #[serde(flatten)]
        page: PayloadPageInfo,
    },
}

/// Payload of a successful sign in
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: AuthToken,
    #[serde(deserialize_with = "deserialize_expiry")]
    pub expired_date: Timestamp,
    pub user: Subject,
}

impl ReplyBody {
    pub fn is_success(&self) -> bool {
        self.code.as_deref() == Some(SUCCESS_CODE)
            || self.operation_type.as_deref() == Some(SUCCESS_OPERATION)
    }
}

impl PageInfo {
    pub fn is_empty(&self) -> bool {
        self.total_elements.is_none()
            && self.total_pages.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
    }

    /// Fields set on `self` take priority
    pub fn or(self, other: Self) -> Self {
        Self {
            total_elements: self.total_elements.or(other.total_elements),
            total_pages: self.total_pages.or(other.total_pages),
            page: self.page.or(other.page),
            page_size: self.page_size.or(other.page_size),
        }
    }
}

impl From<PayloadPageInfo> for PageInfo {
    fn from(value: PayloadPageInfo) -> Self {
        Self {
            total_elements: value.total_elements,
            total_pages: value.total_pages,
            page: value.page,
            page_size: value.page_size,
        }
    }
}

impl<T> ListPayload<T> {
    /// Returns the items and any pagination carried inside the payload
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        match self {
            ListPayload::BareArray(items) => (items, PageInfo::default()),
            ListPayload::Paged { content, page } => (content, page.into()),
            ListPayload::Wrapped { data, page } => (data, page.into()),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Text(text) => write!(f, "{text}"),
            FieldError::Field {
                field: Some(field),
                message,
            } => write!(f, "{field}: {message}"),
            FieldError::Field {
                field: None,
                message,
            } => write!(f, "{message}"),
            FieldError::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Formats a detail value without the quotes JSON would add to strings
pub fn detail_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }
    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Text(text) => text,
        Code::Number(number) => number.to_string(),
    }))
}

fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Expiry {
        Millis(u64),
        Text(String),
    }
    match Expiry::deserialize(deserializer)? {
        Expiry::Millis(millis) => Ok(Timestamp::from_unix_millis(millis)),
        Expiry::Text(text) => Timestamp::parse(&text).map_err(serde::de::Error::custom),
    }
}
