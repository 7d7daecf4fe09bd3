#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use filter_compiler::{Compilation, compile_json};
use model::records::user::{ActivationStatus, EmployeeStatus, User};

pub fn user(user_name: &str) -> User {
    User::new(user_name, Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap())
}

pub fn compile_payload(json: &str) -> Compilation<User> {
    compile_json::<User>(json).expect("payload should decode")
}

/// User names of the records the compiled payload accepts, in input order.
pub fn matching(json: &str, users: &[User]) -> Vec<String> {
    let compilation = compile_payload(json);
    compilation
        .predicate
        .filter(users)
        .into_iter()
        .map(|u| u.user_name.clone())
        .collect()
}

/// A small directory covering the interesting combinations of fields.
pub fn directory() -> Vec<User> {
    let mut admin = user("admin");
    admin.first_name = Some("Irina".into());
    admin.last_name = Some("Petrova".into());
    admin.email = Some("irina@example.com".into());
    admin.department = Some("IT".into());
    admin.is_doc_space_admin = true;

    let mut terminated_admin = user("former");
    terminated_admin.first_name = Some("Igor".into());
    terminated_admin.status = EmployeeStatus::Terminated;
    terminated_admin.is_doc_space_admin = true;
    terminated_admin.terminated_date = Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap());

    let mut pending = user("pending");
    pending.activation_status = ActivationStatus::PENDING;
    pending.email = Some("new.hire@example.org".into());
    pending.quota_limit = Some(1024);

    let mut nameless = user("nameless");
    nameless.first_name = None;
    nameless.department = Some("Sales".into());
    nameless.status = EmployeeStatus::LeaveOfAbsence;
    nameless.is_owner = true;

    vec![admin, terminated_admin, pending, nameless]
}
