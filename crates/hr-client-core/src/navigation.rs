//! Hooks into the host application's routing
//!
//! The client never renders anything itself. It only asks the host to move to
//! another location when the session ends, and offers helpers to decide where
//! a user should be sent.

use hr_shared::{
    const_config::navigation::{NAV_EMPLOYEES, NAV_HOME, NAV_LOGIN, NAV_SALARIES},
    uac::{Subject, ROLE_ADMIN, ROLE_HR_MANAGER, ROLE_PAYROLL_MANAGER},
};
use std::fmt::Debug;
use tracing::info;

use crate::SessionManager;

pub trait Navigator: Debug + Send + Sync {
    /// Moves the host to `path`. Must not block
    fn redirect(&self, path: &str);
}

/// Only records the redirect in the traces. Used when there is no routing to
/// drive, for example on the command line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, path: &str) {
        info!(path, "redirect requested");
    }
}

/// Returns the location to redirect to if `current_path` should not be shown
/// with the current session, or None if it may
///
/// Without a valid session everything except the login page is redirected to
/// it. With one, the login page is redirected home.
pub fn route_guard(session: &SessionManager, current_path: &str) -> Option<&'static str> {
    match (session.is_valid(), current_path == NAV_LOGIN) {
        (false, false) => Some(NAV_LOGIN),
        (true, true) => Some(NAV_HOME),
        _ => None,
    }
}

/// Where a user should land right after logging in
pub fn landing_path(subject: &Subject) -> &'static str {
    if subject.has_role(ROLE_ADMIN) {
        NAV_HOME
    } else if subject.has_role(ROLE_HR_MANAGER) {
        NAV_EMPLOYEES
    } else if subject.has_role(ROLE_PAYROLL_MANAGER) {
        NAV_SALARIES
    } else {
        NAV_HOME
    }
}
