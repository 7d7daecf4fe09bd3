use thiserror::Error;

/// Why a raw filter value could not be converted to a field's declared type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("Value is null")]
    Null,

    #[error("Expected a scalar for {target}, got {found}")]
    NotScalar { target: String, found: &'static str },

    #[error("Cannot convert {found} to {target}")]
    Unsupported { target: String, found: &'static str },

    #[error("'{value}' is not a member of {enum_name}")]
    UnknownVariant {
        enum_name: &'static str,
        value: String,
    },

    #[error("Unparseable timestamp: '{0}'")]
    InvalidTimestamp(String),

    #[error("Malformed unique identifier: '{0}'")]
    InvalidUuid(String),

    #[error("Expected 'true' or 'false', got '{0}'")]
    InvalidBoolean(String),

    #[error("Not a number: '{0}'")]
    InvalidNumber(String),

    #[error("Value {value} does not fit into {target}")]
    Overflow { value: String, target: String },
}

/// Why a condition (or a nested group) was left out of the compiled predicate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropReason {
    #[error("Condition has no field name")]
    EmptyField,

    #[error("Condition has no value")]
    NullValue,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value: {0}")]
    Coercion(#[from] CoercionError),

    #[error("Operator {operator} is not supported for {field} ({data_type})")]
    UnsupportedOperator {
        field: String,
        operator: String,
        data_type: String,
    },

    #[error("Field {0} only accepts true or false")]
    ExpectedBoolean(String),

    #[error("Invalid list for {operator}: {message}")]
    InvalidList { operator: String, message: String },

    #[error("Invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Group nesting exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}

/// Errors surfaced outside of compilation itself, which never fails.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Failed to decode search payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid setting {key}='{value}': {message}")]
    InvalidSetting {
        key: String,
        value: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, FilterError>;
