use super::{Record, SchemaRegistry};
use crate::{error::DropReason, predicate::Predicate};
use lazy_static::lazy_static;
use model::{
    core::{data_type::DataType, value::Value},
    records::user::{ACTIVATION_STATUS, EMPLOYEE_STATUS, User},
};
use serde_json::Value as JsonValue;

lazy_static! {
    pub static ref USER_SCHEMA: SchemaRegistry<User> = build_user_schema();
}

impl Record for User {
    fn schema() -> &'static SchemaRegistry<Self> {
        &USER_SCHEMA
    }
}

fn build_user_schema() -> SchemaRegistry<User> {
    SchemaRegistry::<User>::builder("User")
        .field("Id", DataType::Uuid, |u| Value::Uuid(u.id))
        .field("TenantId", DataType::Int, |u| Value::Int32(u.tenant_id))
        .field("UserName", DataType::String, |u| {
            Value::String(u.user_name.clone())
        })
        .nullable("FirstName", DataType::String, |u| text(&u.first_name))
        .nullable("LastName", DataType::String, |u| text(&u.last_name))
        .nullable("Email", DataType::String, |u| text(&u.email))
        .nullable("Title", DataType::String, |u| text(&u.title))
        .nullable("Department", DataType::String, |u| text(&u.department))
        .nullable("Location", DataType::String, |u| text(&u.location))
        .nullable("MobilePhone", DataType::String, |u| text(&u.mobile_phone))
        .nullable("CultureName", DataType::String, |u| text(&u.culture_name))
        .field("Status", DataType::Enum(&EMPLOYEE_STATUS), |u| {
            Value::Enum(&EMPLOYEE_STATUS, u.status.bits())
        })
        .field("ActivationStatus", DataType::Enum(&ACTIVATION_STATUS), |u| {
            Value::Enum(&ACTIVATION_STATUS, i64::from(u.activation_status.bits()))
        })
        .nullable("WorkFromDate", DataType::Timestamp, |u| {
            u.work_from_date.map(Value::Timestamp).into()
        })
        .nullable("TerminatedDate", DataType::Timestamp, |u| {
            u.terminated_date.map(Value::Timestamp).into()
        })
        .nullable("BirthDate", DataType::Timestamp, |u| {
            u.birth_date.map(Value::Timestamp).into()
        })
        .field("CreateOn", DataType::Timestamp, |u| Value::Timestamp(u.create_on))
        .field("LastModified", DataType::Timestamp, |u| {
            Value::Timestamp(u.last_modified)
        })
        .nullable("Sex", DataType::Boolean, |u| u.sex.map(Value::Boolean).into())
        .field("IsDocSpaceAdmin", DataType::Boolean, |u| {
            Value::Boolean(u.is_doc_space_admin)
        })
        .field("IsOwner", DataType::Boolean, |u| Value::Boolean(u.is_owner))
        .field("IsVisitor", DataType::Boolean, |u| Value::Boolean(u.is_visitor))
        .field("Removed", DataType::Boolean, |u| Value::Boolean(u.removed))
        .nullable("QuotaLimit", DataType::Long, |u| {
            u.quota_limit.map(Value::Int).into()
        })
        .alias("CreateDate", "CreateOn")
        .alias("Mail", "Email")
        .virtual_field("IsActive", "ActivationStatus", is_active)
        .build()
}

fn text(value: &Option<String>) -> Value {
    value.clone().map(Value::String).into()
}

/// `IsActive` only accepts a native JSON boolean; the operator is ignored.
fn is_active(value: &JsonValue) -> Result<Predicate<User>, DropReason> {
    let expected = value
        .as_bool()
        .ok_or_else(|| DropReason::ExpectedBoolean("IsActive".to_string()))?;

    let test = Predicate::Test("IsActive", |u: &User| u.is_active());
    Ok(if expected { test } else { test.negate() })
}
