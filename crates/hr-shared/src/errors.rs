/// Rejected when building one of the constrained string types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
}

/// No usable session is stored, the user needs to sign in again
#[derive(Debug, thiserror::Error)]
#[error("not signed in, or the session has expired")]
pub struct NotLoggedInError;
