//! Query arguments for the HR data endpoints. Fields left as `None` are not
//! sent

use crate::id::RecordId;

#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct EmployeeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Used by salary and attendance listings
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct PeriodFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<RecordId>,
    /// `yyyy-mm`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl PeriodFilter {
    pub fn month<S: Into<String>>(month: S) -> Self {
        Self {
            employee_id: None,
            month: Some(month.into()),
        }
    }

    pub fn employee(employee_id: RecordId) -> Self {
        Self {
            employee_id: Some(employee_id),
            month: None,
        }
    }
}
