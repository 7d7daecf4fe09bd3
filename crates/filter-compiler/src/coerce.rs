use crate::error::CoercionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use model::core::{data_type::DataType, enum_type::EnumType, value::Value};
use serde_json::{Number, Value as JsonValue};
use uuid::Uuid;

/// Convert an untyped JSON value into `target`. Nullability is not part of
/// [`DataType`], so nullable fields coerce against their underlying type.
pub fn coerce(raw: &JsonValue, target: &DataType) -> Result<Value, CoercionError> {
    match raw {
        JsonValue::Null => return Err(CoercionError::Null),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            return Err(CoercionError::NotScalar {
                target: target.to_string(),
                found: json_kind(raw),
            });
        }
        _ => {}
    }

    match target {
        DataType::Enum(enum_type) => coerce_enum(raw, enum_type),
        DataType::Timestamp => coerce_timestamp(raw).map(Value::Timestamp),
        DataType::Uuid => coerce_uuid(raw).map(Value::Uuid),
        DataType::Boolean => coerce_bool(raw).map(Value::Boolean),
        DataType::Int => {
            let value = coerce_integer(raw, target)?;
            i32::try_from(value)
                .map(Value::Int32)
                .map_err(|_| overflow(value, target))
        }
        DataType::Long => coerce_integer(raw, target).map(Value::Int),
        DataType::Double => coerce_float(raw).map(Value::Float),
        DataType::String => Ok(Value::String(coerce_text(raw))),
    }
}

/// Coerce every element of a JSON array; a scalar is treated as a
/// single-element list.
pub fn coerce_list(raw: &JsonValue, target: &DataType) -> Result<Vec<Value>, CoercionError> {
    match raw {
        JsonValue::Array(items) => items.iter().map(|item| coerce(item, target)).collect(),
        other => coerce(other, target).map(|value| vec![value]),
    }
}

fn coerce_enum(raw: &JsonValue, enum_type: &'static EnumType) -> Result<Value, CoercionError> {
    match raw {
        JsonValue::String(s) => enum_type
            .parse_name(s)
            .map(|bits| Value::Enum(enum_type, bits))
            .ok_or_else(|| CoercionError::UnknownVariant {
                enum_name: enum_type.name,
                value: s.clone(),
            }),
        // Any integer is a valid representation, declared or not
        JsonValue::Number(n) => {
            number_to_i64(n, &DataType::Enum(enum_type)).map(|bits| Value::Enum(enum_type, bits))
        }
        other => Err(unsupported(other, &DataType::Enum(enum_type))),
    }
}

fn coerce_timestamp(raw: &JsonValue) -> Result<DateTime<Utc>, CoercionError> {
    match raw {
        JsonValue::String(s) => {
            parse_timestamp(s).ok_or_else(|| CoercionError::InvalidTimestamp(s.clone()))
        }
        other => Err(unsupported(other, &DataType::Timestamp)),
    }
}

fn coerce_uuid(raw: &JsonValue) -> Result<Uuid, CoercionError> {
    match raw {
        JsonValue::String(s) => {
            Uuid::try_parse(s.trim()).map_err(|_| CoercionError::InvalidUuid(s.clone()))
        }
        other => Err(unsupported(other, &DataType::Uuid)),
    }
}

fn coerce_bool(raw: &JsonValue) -> Result<bool, CoercionError> {
    match raw {
        JsonValue::Bool(b) => Ok(*b),
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CoercionError::InvalidBoolean(s.clone())),
        },
        other => Err(unsupported(other, &DataType::Boolean)),
    }
}

fn coerce_integer(raw: &JsonValue, target: &DataType) -> Result<i64, CoercionError> {
    match raw {
        JsonValue::Number(n) => number_to_i64(n, target),
        JsonValue::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().map_err(|e| {
                use std::num::IntErrorKind::*;
                match e.kind() {
                    PosOverflow | NegOverflow => CoercionError::Overflow {
                        value: trimmed.to_string(),
                        target: target.to_string(),
                    },
                    _ => CoercionError::InvalidNumber(s.clone()),
                }
            })
        }
        JsonValue::Bool(b) => Ok(i64::from(*b)),
        other => Err(unsupported(other, target)),
    }
}

fn coerce_float(raw: &JsonValue) -> Result<f64, CoercionError> {
    let value = match raw {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| CoercionError::InvalidNumber(n.to_string()))?,
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoercionError::InvalidNumber(s.clone()))?,
        JsonValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        other => return Err(unsupported(other, &DataType::Double)),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoercionError::InvalidNumber(raw.to_string()))
    }
}

fn coerce_text(raw: &JsonValue) -> String {
    match raw {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integral JSON numbers convert exactly; fractional ones round half to even.
fn number_to_i64(n: &Number, target: &DataType) -> Result<i64, CoercionError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(overflow(n, target));
    }

    let f = n
        .as_f64()
        .ok_or_else(|| CoercionError::InvalidNumber(n.to_string()))?;
    let rounded = f.round_ties_even();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(overflow(n, target));
    }
    Ok(rounded as i64)
}

/// Permissive, locale-independent timestamp parsing. Values without an
/// offset are taken as UTC; dates without a time mean midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_naive_datetime(raw)
        .or_else(|| parse_naive_date(raw).map(|date| date.and_time(NaiveTime::MIN)))
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn parse_naive_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"];

    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn overflow(value: impl ToString, target: &DataType) -> CoercionError {
    CoercionError::Overflow {
        value: value.to_string(),
        target: target.to_string(),
    }
}

fn unsupported(raw: &JsonValue, target: &DataType) -> CoercionError {
    CoercionError::Unsupported {
        target: target.to_string(),
        found: json_kind(raw),
    }
}

fn json_kind(raw: &JsonValue) -> &'static str {
    match raw {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
