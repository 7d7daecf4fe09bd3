use crate::core::enum_type::EnumType;
use std::{borrow::Cow, fmt};

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataType {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    Double,
    Boolean,
    String,
    Uuid,
    Timestamp,
    Enum(&'static EnumType),
}

impl DataType {
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            DataType::Int => Cow::Borrowed("INT"),
            DataType::Long => Cow::Borrowed("BIGINT"),
            DataType::Double => Cow::Borrowed("DOUBLE"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::String => Cow::Borrowed("TEXT"),
            DataType::Uuid => Cow::Borrowed("UUID"),
            DataType::Timestamp => Cow::Borrowed("TIMESTAMP"),
            DataType::Enum(enum_type) if enum_type.flags => {
                Cow::Owned(format!("FLAGS({})", enum_type.name))
            }
            DataType::Enum(enum_type) => Cow::Owned(format!("ENUM({})", enum_type.name)),
        }
    }

    /// Whether `<`, `<=`, `>`, `>=` are meaningful for values of this type.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            DataType::Int | DataType::Long | DataType::Double | DataType::Timestamp
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
