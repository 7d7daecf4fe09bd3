use crate::error::DropReason;
use std::fmt;

pub const ROOT_PATH: &str = "rootGroup";

/// A condition or group that was left out of the compiled predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedCondition {
    /// Location in the payload, e.g. `rootGroup.groups[1].conditions[0]`.
    pub path: String,
    pub field: Option<String>,
    pub operator: Option<String>,
    pub reason: DropReason,
}

impl DroppedCondition {
    pub fn condition(path: String, field: &str, operator: &str, reason: DropReason) -> Self {
        DroppedCondition {
            path,
            field: non_empty(field),
            operator: non_empty(operator),
            reason,
        }
    }

    pub fn group(path: String, reason: DropReason) -> Self {
        DroppedCondition {
            path,
            field: None,
            operator: None,
            reason,
        }
    }
}

impl fmt::Display for DroppedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        match (&self.field, &self.operator) {
            (Some(field), Some(op)) => write!(f, " ({field} {op})")?,
            (Some(field), None) => write!(f, " ({field})")?,
            (None, Some(op)) => write!(f, " ({op})")?,
            (None, None) => {}
        }
        write!(f, ": {}", self.reason)
    }
}

pub fn condition_path(group_path: &str, index: usize) -> String {
    format!("{group_path}.conditions[{index}]")
}

pub fn group_path(group_path: &str, index: usize) -> String {
    format!("{group_path}.groups[{index}]")
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
