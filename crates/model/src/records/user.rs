use crate::core::enum_type::EnumType;
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employment state of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active = 1,
    Terminated = 2,
    LeaveOfAbsence = 4,
}

pub static EMPLOYEE_STATUS: EnumType = EnumType {
    name: "EmployeeStatus",
    variants: &[("Active", 1), ("Terminated", 2), ("LeaveOfAbsence", 4)],
    flags: false,
};

impl EmployeeStatus {
    pub fn bits(self) -> i64 {
        self as i64
    }
}

bitflags! {
    /// Activation state of a user account. Stored as a bit set; a user is
    /// considered active when `ACTIVATED` is present.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ActivationStatus: u32 {
        const NOT_ACTIVATED = 0;
        const ACTIVATED = 1;
        const PENDING = 2;
        const AUTO_GENERATED = 4;
    }
}

pub static ACTIVATION_STATUS: EnumType = EnumType {
    name: "EmployeeActivationStatus",
    variants: &[
        ("NotActivated", 0),
        ("Activated", 1),
        ("Pending", 2),
        ("AutoGenerated", 4),
    ],
    flags: true,
};

/// The user record that filter trees are compiled against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub tenant_id: i32,
    pub user_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default)]
    pub culture_name: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub activation_status: ActivationStatus,
    #[serde(default)]
    pub work_from_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub terminated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub birth_date: Option<DateTime<Utc>>,
    pub create_on: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub sex: Option<bool>,
    #[serde(default)]
    pub is_doc_space_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_visitor: bool,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub quota_limit: Option<i64>,
}

impl User {
    /// A minimal active user, convenient as a base for building records.
    pub fn new(user_name: &str, created: DateTime<Utc>) -> Self {
        User {
            id: Uuid::new_v4(),
            tenant_id: 0,
            user_name: user_name.to_string(),
            first_name: None,
            last_name: None,
            email: None,
            title: None,
            department: None,
            location: None,
            mobile_phone: None,
            culture_name: None,
            status: EmployeeStatus::Active,
            activation_status: ActivationStatus::ACTIVATED,
            work_from_date: None,
            terminated_date: None,
            birth_date: None,
            create_on: created,
            last_modified: created,
            sex: None,
            is_doc_space_admin: false,
            is_owner: false,
            is_visitor: false,
            removed: false,
            quota_limit: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.activation_status.contains(ActivationStatus::ACTIVATED)
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.user_name.clone(),
        }
    }
}
