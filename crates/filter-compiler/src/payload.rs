use crate::{error::Result, operator::LogicalOp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// One `field operator value` test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCondition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub operator: String,

    /// Any JSON value; `None` when absent or `null`.
    #[serde(default)]
    pub value: Option<JsonValue>,
}

impl SearchCondition {
    pub fn new(field: &str, operator: &str, value: impl Into<JsonValue>) -> Self {
        let value = value.into();
        SearchCondition {
            field: field.to_string(),
            operator: operator.to_string(),
            value: (!value.is_null()).then_some(value),
        }
    }
}

/// A node of the filter tree: conditions and nested groups combined with
/// one logical operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalGroup {
    #[serde(default = "default_operator", deserialize_with = "null_as_default")]
    pub operator: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<SearchCondition>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<LogicalGroup>,
}

impl Default for LogicalGroup {
    fn default() -> Self {
        LogicalGroup {
            operator: default_operator(),
            conditions: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl LogicalGroup {
    pub fn and(conditions: Vec<SearchCondition>) -> Self {
        Self::with_operator(LogicalOp::And, conditions)
    }

    pub fn or(conditions: Vec<SearchCondition>) -> Self {
        Self::with_operator(LogicalOp::Or, conditions)
    }

    pub fn with_operator(op: LogicalOp, conditions: Vec<SearchCondition>) -> Self {
        LogicalGroup {
            operator: op.to_string(),
            conditions,
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: LogicalGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn logical_op(&self) -> LogicalOp {
        LogicalOp::from_token(&self.operator)
    }
}

/// Root of a search request. A missing root group matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    #[serde(rename = "rootGroup", default)]
    pub root_group: Option<LogicalGroup>,
}

impl SearchPayload {
    pub fn new(root_group: LogicalGroup) -> Self {
        SearchPayload {
            root_group: Some(root_group),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_operator() -> String {
    LogicalOp::And.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
