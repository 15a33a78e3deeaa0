use std::collections::BTreeSet;
use strum::IntoEnumIterator;

use super::{Subject, ROLE_ADMIN, ROLE_HR_MANAGER, ROLE_PAYROLL_MANAGER};

/// Something a front-end may choose to show or hide based on the roles of the
/// logged in user. This is advisory only, the backend enforces access
#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    strum::EnumIter,
)]
pub enum Capability {
    ViewDashboard,
    ManageEmployees,
    ManageDepartments,
    ManagePositions,
    ManageAttendance,
    ManageSalaries,
    ManageDividends,
    ManageUsers,
    EditProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<Capability>);

impl Capability {
    /// Having any one of these roles grants the capability
    pub fn required_roles(&self) -> &'static [&'static str] {
        match self {
            Capability::ViewDashboard => &[ROLE_ADMIN, ROLE_HR_MANAGER, ROLE_PAYROLL_MANAGER],
            Capability::ManageEmployees
            | Capability::ManageDepartments
            | Capability::ManagePositions
            | Capability::ManageAttendance
            | Capability::EditProfile => &[ROLE_ADMIN, ROLE_HR_MANAGER],
            Capability::ManageSalaries | Capability::ManageDividends => {
                &[ROLE_ADMIN, ROLE_PAYROLL_MANAGER]
            }
            Capability::ManageUsers => &[ROLE_ADMIN],
        }
    }

    /// Front-end location for the capability's page
    pub fn nav_path(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "/",
            Capability::ManageEmployees => "/employees",
            Capability::ManageDepartments => "/departments",
            Capability::ManagePositions => "/positions",
            Capability::ManageAttendance => "/attendance",
            Capability::ManageSalaries => "/salaries",
            Capability::ManageDividends => "/dividends",
            Capability::ManageUsers => "/users",
            Capability::EditProfile => "/profile",
        }
    }
}

impl Capabilities {
    pub fn for_subject(subject: Option<&Subject>) -> Self {
        let Some(subject) = subject else {
            return Self::default();
        };
        Self(
            Capability::iter()
                .filter(|cap| subject.has_any_role(cap.required_roles()))
                .collect(),
        )
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in declaration order, which is also menu order
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            Capability::ViewDashboard => "Dashboard",
            Capability::ManageEmployees => "Employees",
            Capability::ManageDepartments => "Departments",
            Capability::ManagePositions => "Positions",
            Capability::ManageAttendance => "Attendance",
            Capability::ManageSalaries => "Salaries",
            Capability::ManageDividends => "Dividends",
            Capability::ManageUsers => "Users",
            Capability::EditProfile => "Profile",
        };
        write!(f, "{display_text}")
    }
}
