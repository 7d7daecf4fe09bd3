mod common;

use common::{compile_payload, directory, matching, user};
use filter_compiler::{DropReason, Predicate};
use model::records::user::{ActivationStatus, EmployeeStatus};

#[test]
fn empty_or_missing_root_group_matches_everything() {
    let users = directory();
    for payload in [
        r#"{}"#,
        r#"{"rootGroup": null}"#,
        r#"{"rootGroup": {}}"#,
        r#"{"rootGroup": {"operator": "OR", "conditions": [], "groups": []}}"#,
    ] {
        assert_eq!(matching(payload, &users).len(), users.len(), "{payload}");
    }
}

// Scenario: every condition in the group is invalid.
// Expected Outcome: the group places no constraint.
#[test]
fn group_with_only_dropped_conditions_matches_everything() {
    let users = directory();
    let payload = r#"{"rootGroup": {"operator": "AND", "conditions": [
        {"field": "Salary", "operator": "GREATER_THAN", "value": 1000},
        {"field": "", "operator": "EQUALS", "value": "x"},
        {"field": "Email", "operator": "EQUALS", "value": null},
        {"field": "Status", "operator": "EQUALS", "value": "Retired"}
    ]}}"#;

    let compilation = compile_payload(payload);
    assert!(compilation.predicate.is_always_true());
    assert_eq!(compilation.dropped.len(), 4);
    assert_eq!(matching(payload, &users).len(), users.len());
}

#[test]
fn active_doc_space_admins() {
    let payload = r#"{"rootGroup": {"operator": "AND", "conditions": [
        {"field": "Status", "operator": "EQUALS", "value": "Active"},
        {"field": "IsDocSpaceAdmin", "operator": "EQUALS", "value": true}
    ]}}"#;

    assert_eq!(matching(payload, &directory()), vec!["admin"]);
}

#[test]
fn is_active_true_and_false_are_exact_complements() {
    let users = directory();
    let active = matching(
        r#"{"rootGroup": {"conditions": [{"field": "IsActive", "operator": "EQUALS", "value": true}]}}"#,
        &users,
    );
    let inactive = matching(
        r#"{"rootGroup": {"conditions": [{"field": "IsActive", "operator": "EQUALS", "value": false}]}}"#,
        &users,
    );

    assert_eq!(active, vec!["admin", "former", "nameless"]);
    assert_eq!(inactive, vec!["pending"]);

    let mut auto = user("auto");
    auto.activation_status = ActivationStatus::ACTIVATED | ActivationStatus::AUTO_GENERATED;
    assert_eq!(
        matching(
            r#"{"rootGroup": {"conditions": [{"field": "isActive", "value": true}]}}"#,
            &[auto]
        ),
        vec!["auto"]
    );
}

#[test]
fn is_active_requires_native_boolean() {
    let compilation = compile_payload(
        r#"{"rootGroup": {"conditions": [{"field": "IsActive", "operator": "EQUALS", "value": "true"}]}}"#,
    );
    assert!(compilation.predicate.is_always_true());
    assert_eq!(
        compilation.dropped[0].reason,
        DropReason::ExpectedBoolean("IsActive".into())
    );
}

#[test]
fn starts_with_on_null_first_name_is_false() {
    let payload = r#"{"rootGroup": {"conditions": [
        {"field": "FirstName", "operator": "STARTS_WITH", "value": "I"}
    ]}}"#;

    let compilation = compile_payload(payload);
    assert!(compilation.is_complete());
    assert_eq!(matching(payload, &directory()), vec!["admin", "former"]);
}

// Scenario: (Department == "IT" AND IsDocSpaceAdmin) OR (Status == LeaveOfAbsence AND IsOwner).
// Expected Outcome: records matching the first, the second, or both branches pass.
#[test]
fn nested_or_of_ands() {
    let payload = r#"{"rootGroup": {"operator": "OR", "groups": [
        {"operator": "AND", "conditions": [
            {"field": "Department", "operator": "EQUALS", "value": "IT"},
            {"field": "IsDocSpaceAdmin", "operator": "EQUALS", "value": true}
        ]},
        {"operator": "AND", "conditions": [
            {"field": "Status", "operator": "EQUALS", "value": "LeaveOfAbsence"},
            {"field": "IsOwner", "operator": "EQUALS", "value": true}
        ]}
    ]}}"#;

    let mut first_only = user("first");
    first_only.department = Some("IT".into());
    first_only.is_doc_space_admin = true;

    let mut second_only = user("second");
    second_only.status = EmployeeStatus::LeaveOfAbsence;
    second_only.is_owner = true;

    let mut neither = user("neither");
    neither.department = Some("IT".into());
    neither.is_owner = true;

    let mut both = user("both");
    both.department = Some("IT".into());
    both.is_doc_space_admin = true;
    both.status = EmployeeStatus::LeaveOfAbsence;
    both.is_owner = true;

    assert_eq!(
        matching(payload, &[first_only, second_only, neither, both]),
        vec!["first", "second", "both"]
    );

    let compilation = compile_payload(payload);
    assert!(matches!(compilation.predicate, Predicate::Or(ref branches) if branches.len() == 2));
}

#[test]
fn unknown_field_is_the_same_as_omitting_the_condition() {
    let users = directory();
    let with_unknown = r#"{"rootGroup": {"conditions": [
        {"field": "Department", "operator": "CONTAINS", "value": "a"},
        {"field": "ShoeSize", "operator": "EQUALS", "value": 42}
    ]}}"#;
    let without = r#"{"rootGroup": {"conditions": [
        {"field": "Department", "operator": "CONTAINS", "value": "a"}
    ]}}"#;

    assert_eq!(matching(with_unknown, &users), matching(without, &users));
    assert_eq!(matching(without, &users), vec!["nameless"]);
}

#[test]
fn field_names_and_operators_ignore_case() {
    let users = directory();
    let canonical = matching(
        r#"{"rootGroup": {"conditions": [{"field": "Email", "operator": "ENDS_WITH", "value": ".com"}]}}"#,
        &users,
    );
    let shouting = matching(
        r#"{"rootGroup": {"operator": "and", "conditions": [{"field": "EMAIL", "operator": "ends_with", "value": ".com"}]}}"#,
        &users,
    );
    let alias = matching(
        r#"{"rootGroup": {"conditions": [{"field": "mail", "operator": "Ends_With", "value": ".com"}]}}"#,
        &users,
    );

    assert_eq!(canonical, vec!["admin"]);
    assert_eq!(shouting, canonical);
    assert_eq!(alias, canonical);
}

#[test]
fn unrecognized_group_operator_means_and() {
    let payload = r#"{"rootGroup": {"operator": "XOR", "conditions": [
        {"field": "IsDocSpaceAdmin", "operator": "EQUALS", "value": true},
        {"field": "Status", "operator": "EQUALS", "value": 2}
    ]}}"#;
    assert_eq!(matching(payload, &directory()), vec!["former"]);
}

// Scenario: invalid conditions inside nested groups.
// Expected Outcome: each one is reported with its location in the payload.
#[test]
fn diagnostics_locate_dropped_conditions() {
    let compilation = compile_payload(
        r#"{"rootGroup": {"operator": "OR", "conditions": [
            {"field": "IsOwner", "operator": "EQUALS", "value": true}
        ], "groups": [
            {"conditions": [{"field": "Id", "operator": "EQUALS", "value": "not-a-uuid"}]},
            {"conditions": [
                {"field": "LastName", "operator": "GREATER_THAN", "value": "M"},
                {"field": "BirthDate", "operator": "LESS_THAN", "value": "1990-01-01"}
            ]}
        ]}}"#,
    );

    let report = compilation
        .dropped
        .iter()
        .map(|d| (d.path.as_str(), d.field.as_deref()))
        .collect::<Vec<_>>();
    assert_eq!(
        report,
        vec![
            ("rootGroup.groups[0].conditions[0]", Some("Id")),
            ("rootGroup.groups[1].conditions[0]", Some("LastName")),
        ]
    );
    assert!(matches!(
        compilation.dropped[1].reason,
        DropReason::UnsupportedOperator { .. }
    ));
}
