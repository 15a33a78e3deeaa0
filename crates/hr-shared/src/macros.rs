/// Logs the error at warn and carries on. For best-effort steps such as
/// telling the backend about a logout or persisting session slots
#[macro_export]
macro_rules! log_err_as_warn {
    ($arg: expr) => {
        if let Err(mishap) = $arg {
            tracing::warn!(?mishap);
        }
    };
}
