//! Turns a raw reply (status and body text) into an [`Envelope`]
//!
//! Rules are applied in order:
//! 1. 401 is always an expired session, the body is not looked at
//! 2. 403 is always a permission failure
//! 3. Any other non 2xx status is reduced from the error body
//! 4. A 2xx reply is only a success if the body says so
//!
//! Session side effects are not applied here, see the caller.

use hr_shared::{
    const_config::error::{
        ERR_CODE_GENERIC, ERR_CODE_HTTP, ERR_CODE_VALIDATION, ERR_MSG_GENERIC, ERR_MSG_VALIDATION,
    },
    responses::{
        detail_value_to_string, ErrorDetails, ListPayload, PageInfo, ReplyBody, SignInResponse,
    },
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::envelope::{ApiError, Envelope, ErrorKind, Success};

/// Code the account backend uses for bean validation failures
const VALIDATION_CODE_INVALID: &str = "INVALID";
const ERR_MSG_BAD_CREDENTIALS: &str = "invalid username or password";
const ERR_CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";

pub(crate) fn reduce_reply<U: DeserializeOwned>(status: StatusCode, body: &str) -> Envelope<U> {
    reduce(status, body, |data| {
        serde_json::from_value(data).map(|payload| (payload, PageInfo::default()))
    })
}

/// Accepts any of the list shapes and merges pagination found inside the
/// payload with pagination found at the top level. Top level wins
pub(crate) fn reduce_list_reply<U: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Envelope<Vec<U>> {
    reduce(status, body, |data| {
        if data.is_null() {
            return Ok((Vec::new(), PageInfo::default()));
        }
        serde_json::from_value::<ListPayload<U>>(data).map(ListPayload::into_parts)
    })
}

/// A 401 on sign in means bad credentials, not an expired session
pub(crate) fn reduce_login_reply(status: StatusCode, body: &str) -> Envelope<SignInResponse> {
    if status == StatusCode::UNAUTHORIZED {
        let reply = serde_json::from_str::<ReplyBody>(body).unwrap_or_default();
        let message = non_empty(reply.message).unwrap_or_else(|| ERR_MSG_BAD_CREDENTIALS.into());
        return Err(ApiError::new(ErrorKind::BackendError, message)
            .code(reply.code.unwrap_or_else(|| ERR_CODE_UNAUTHORIZED.into()))
            .status(status.as_u16())
            .correlation_id(reply.trace_id));
    }
    reduce_reply(status, body)
}

fn reduce<U, F>(status: StatusCode, body: &str, extract: F) -> Envelope<U>
where
    F: FnOnce(Value) -> Result<(U, PageInfo), serde_json::Error>,
{
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::auth_expired());
    }
    if status == StatusCode::FORBIDDEN {
        return Err(ApiError::forbidden());
    }
    if !status.is_success() {
        return Err(error_from_failed_status(status, body));
    }

    let reply = if body.trim().is_empty() {
        None
    } else {
        match serde_json::from_str::<ReplyBody>(body) {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(?e, %status, "reply body could not be parsed");
                return Err(ApiError::malformed(status.as_u16()));
            }
        }
    };
    let Some(reply) = reply else {
        // Nothing to check a discriminator on, accept it if the caller expects nothing
        return match extract(Value::Null) {
            Ok((payload, _)) => Ok(Success::new(payload)),
            Err(e) => {
                warn!(?e, %status, "empty reply where a payload was expected");
                Err(ApiError::malformed(status.as_u16()))
            }
        };
    };
    if !reply.is_success() {
        return Err(error_from_reply(reply, status));
    }

    let ReplyBody {
        message,
        data,
        page,
        trace_id,
        ..
    } = reply;
    match extract(data.unwrap_or(Value::Null)) {
        Ok((payload, inner_page)) => {
            let page = page.or(inner_page);
            Ok(Success {
                payload,
                page_info: (!page.is_empty()).then_some(page),
                message,
                correlation_id: trace_id,
            })
        }
        Err(e) => {
            warn!(?e, %status, "payload did not have the expected shape");
            Err(ApiError::malformed(status.as_u16()).correlation_id(trace_id))
        }
    }
}

/// Falls back to the raw text, or the status line if there is no text, when the
/// body is not an error envelope
fn error_from_failed_status(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ReplyBody>(body) {
        Ok(reply) => error_from_reply(reply, status),
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() {
                status.to_string()
            } else {
                text.to_string()
            };
            ApiError::new(ErrorKind::BackendError, message)
                .code(ERR_CODE_HTTP)
                .status(status.as_u16())
        }
    }
}

fn error_from_reply(reply: ReplyBody, status: StatusCode) -> ApiError {
    let ReplyBody {
        code,
        message,
        trace_id,
        domain,
        details,
        ..
    } = reply;
    let message = non_empty(message);

    if let Some(ErrorDetails::Entries(entries)) = details {
        let joined = entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let message = if joined.is_empty() {
            message.unwrap_or_else(|| ERR_MSG_VALIDATION.into())
        } else {
            joined
        };
        let mut error = ApiError::new(ErrorKind::ValidationFailed, message)
            .code(code.unwrap_or_else(|| ERR_CODE_VALIDATION.into()))
            .status(status.as_u16())
            .correlation_id(trace_id);
        error.field_errors = Some(entries);
        return error;
    }

    let mut text = message.unwrap_or_else(|| ERR_MSG_GENERIC.into());
    if let Some(domain) = non_empty(domain) {
        text = format!("[{domain}] {text}");
    }
    if let Some(ErrorDetails::Map(map)) = &details {
        let pairs = map
            .iter()
            .map(|(key, value)| format!("{key}: {}", detail_value_to_string(value)))
            .collect::<Vec<_>>()
            .join(", ");
        if !pairs.is_empty() {
            text = format!("{text}\n{pairs}");
        }
    }
    let kind = if code.as_deref() == Some(VALIDATION_CODE_INVALID) {
        ErrorKind::ValidationFailed
    } else {
        ErrorKind::BackendError
    };
    ApiError::new(kind, text)
        .code(code.unwrap_or_else(|| ERR_CODE_GENERIC.into()))
        .status(status.as_u16())
        .correlation_id(trace_id)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
