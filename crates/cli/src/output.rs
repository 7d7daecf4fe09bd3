use crate::error::CliError;
use filter_compiler::{Compilation, DroppedCondition, Record, SchemaRegistry};
use model::records::user::User;
use serde_json::json;

pub fn users_json(users: &[&User]) -> Result<String, CliError> {
    serde_json::to_string_pretty(users).map_err(CliError::JsonSerialize)
}

pub fn users_table(users: &[&User]) -> String {
    let mut out = format!(
        "{:<20} {:<28} {:<32} {:<16} {}\n",
        "UserName", "Name", "Email", "Status", "Active"
    );
    out.push_str(&"-".repeat(104));
    out.push('\n');

    for user in users {
        out.push_str(&format!(
            "{:<20} {:<28} {:<32} {:<16} {}\n",
            user.user_name,
            user.display_name(),
            user.email.as_deref().unwrap_or("-"),
            format!("{:?}", user.status),
            if user.is_active() { "yes" } else { "no" }
        ));
    }
    out.push_str(&format!("{} user(s)", users.len()));
    out
}

pub fn explain_json(compilation: &Compilation<User>) -> Result<String, CliError> {
    let dropped = compilation
        .dropped
        .iter()
        .map(|d| {
            json!({
                "path": d.path,
                "field": d.field,
                "operator": d.operator,
                "reason": d.reason.to_string(),
            })
        })
        .collect::<Vec<_>>();

    serde_json::to_string_pretty(&json!({
        "predicate": compilation.predicate.to_string(),
        "dropped": dropped,
    }))
    .map_err(CliError::JsonSerialize)
}

pub fn explain_text(compilation: &Compilation<User>) -> String {
    let mut out = format!("Predicate: {}\n", compilation.predicate);
    if compilation.is_complete() {
        out.push_str("Dropped:   none");
    } else {
        out.push_str("Dropped:\n");
        out.push_str(&dropped_lines(&compilation.dropped));
    }
    out
}

fn dropped_lines(dropped: &[DroppedCondition]) -> String {
    dropped
        .iter()
        .map(|d| format!("  - {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn fields_json() -> Result<String, CliError> {
    let schema = User::schema();
    let fields = schema
        .fields()
        .map(|f| {
            json!({
                "name": f.name,
                "type": f.data_type.to_string(),
                "nullable": f.nullable,
            })
        })
        .collect::<Vec<_>>();

    serde_json::to_string_pretty(&json!({
        "record": schema.record_name(),
        "fields": fields,
        "aliases": sorted_aliases(schema)
            .into_iter()
            .map(|(alias, target)| json!({"alias": alias, "field": target}))
            .collect::<Vec<_>>(),
        "virtual": schema
            .virtual_fields()
            .map(|v| json!({"name": v.name, "derivedFrom": v.derived_from}))
            .collect::<Vec<_>>(),
    }))
    .map_err(CliError::JsonSerialize)
}

pub fn fields_table() -> String {
    let schema = User::schema();
    let mut out = format!("{:<18} {:<36} {}\n", "Field", "Type", "Nullable");
    out.push_str(&"-".repeat(64));
    out.push('\n');
    for field in schema.fields() {
        out.push_str(&format!(
            "{:<18} {:<36} {}\n",
            field.name,
            field.data_type.to_string(),
            if field.nullable { "yes" } else { "no" }
        ));
    }

    out.push_str("\nAliases:\n");
    for (alias, target) in sorted_aliases(schema) {
        let kind = if schema.virtual_fields().any(|v| v.name == alias) {
            " (derived)"
        } else {
            ""
        };
        out.push_str(&format!("  {alias} -> {target}{kind}\n"));
    }
    out
}

fn sorted_aliases(schema: &SchemaRegistry<User>) -> Vec<(&'static str, &'static str)> {
    let mut aliases = schema.aliases().collect::<Vec<_>>();
    aliases.sort();
    aliases
}
