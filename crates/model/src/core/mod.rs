pub mod data_type;
pub mod enum_type;
pub mod value;
