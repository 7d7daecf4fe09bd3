use crate::core::enum_type::EnumType;
use chrono::{DateTime, SecondsFormat, Utc};
use std::{cmp::Ordering, fmt};
use uuid::Uuid;

/// A typed scalar read from a record field or produced by coercing a
/// filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Enum(&'static EnumType, i64),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(v) => Some(*v as f64),
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Compare two values of compatible types. Returns `None` when either
    /// side is null or the types cannot be compared.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int32(a), Int32(b)) => Some(a.cmp(b)),
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Int32(a), Int(b)) => Some((*a as i64).cmp(b)),
            (Int(a), Int32(b)) => Some(a.cmp(&(*b as i64))),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Float(_), Int32(_) | Int(_)) | (Int32(_) | Int(_), Float(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            (Enum(ta, a), Enum(tb, b)) if ta == tb => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl From<Option<Value>> for Value {
    fn from(value: Option<Value>) -> Self {
        value.unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Timestamp(v) => {
                write!(f, "'{}'", v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Enum(enum_type, v) => write!(f, "{}", enum_type.describe(*v)),
            Value::Null => write!(f, "NULL"),
        }
    }
}
