//! The uniform result handed back for every gateway request
//!
//! Every request resolves to an [`Envelope`]. Failures are values, the gateway
//! never panics or returns a transport error directly.

use hr_shared::{
    const_config::error::{
        ERR_CODE_FORBIDDEN, ERR_CODE_SESSION_NOT_SAVED, ERR_MSG_CONNECTIVITY, ERR_MSG_FORBIDDEN,
        ERR_MSG_MALFORMED, ERR_MSG_SESSION_EXPIRED, ERR_MSG_SESSION_NOT_SAVED,
    },
    responses::{FieldError, PageInfo},
};
use std::fmt::Display;

pub type Envelope<T> = Result<Success<T>, ApiError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Success<T> {
    pub payload: T,
    /// Only set when the reply carried pagination fields
    pub page_info: Option<PageInfo>,
    pub message: Option<String>,
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend rejected the token. The session has been cleared
    AuthExpired,
    /// Authenticated but not allowed. The session is left alone
    Forbidden,
    /// The backend sent a list of field errors
    ValidationFailed,
    /// Any other failure reported by the backend
    BackendError,
    /// No usable reply was received
    ConnectivityError,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Human readable, suitable for showing to the user as is
    pub message: String,
    pub code: Option<String>,
    pub field_errors: Option<Vec<FieldError>>,
    pub correlation_id: Option<String>,
    /// HTTP status if a reply was received
    pub status: Option<u16>,
}

impl<T> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            page_info: None,
            message: None,
            correlation_id: None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Success<U> {
        Success {
            payload: f(self.payload),
            page_info: self.page_info,
            message: self.message,
            correlation_id: self.correlation_id,
        }
    }
}

impl ApiError {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            field_errors: None,
            correlation_id: None,
            status: None,
        }
    }

    pub fn auth_expired() -> Self {
        Self::new(ErrorKind::AuthExpired, ERR_MSG_SESSION_EXPIRED).status(401)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden, ERR_MSG_FORBIDDEN)
            .code(ERR_CODE_FORBIDDEN)
            .status(403)
    }

    pub fn connectivity() -> Self {
        Self::new(ErrorKind::ConnectivityError, ERR_MSG_CONNECTIVITY)
    }

    pub fn malformed(status: u16) -> Self {
        Self::new(ErrorKind::ConnectivityError, ERR_MSG_MALFORMED).status(status)
    }

    /// The backend accepted the sign in but the credential could not be stored
    pub fn session_not_saved() -> Self {
        Self::new(ErrorKind::BackendError, ERR_MSG_SESSION_NOT_SAVED)
            .code(ERR_CODE_SESSION_NOT_SAVED)
    }

    pub fn code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn correlation_id(mut self, correlation_id: Option<String>) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn is_auth_expired(&self) -> bool {
        self.kind == ErrorKind::AuthExpired
    }

    /// Message with the trace id appended when there is one, for quoting to
    /// support
    pub fn user_message(&self) -> String {
        match &self.correlation_id {
            Some(id) => format!("{} (trace id: {id})", self.message),
            None => self.message.clone(),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ErrorKind::AuthExpired => "auth expired",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::ValidationFailed => "validation failed",
            ErrorKind::BackendError => "backend error",
            ErrorKind::ConnectivityError => "connectivity error",
        };
        write!(f, "{text}")
    }
}
