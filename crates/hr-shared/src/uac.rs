//! Shared items related to user account control

mod capabilities;
mod role;
mod user;

pub use capabilities::{Capabilities, Capability};
pub use role::{RoleName, RoleRecord, ROLE_ADMIN, ROLE_HR_MANAGER, ROLE_PAYROLL_MANAGER};
pub use user::{DisplayName, Subject, UserRecord, Username};
