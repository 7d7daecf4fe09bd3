use crate::{
    error::DropReason,
    predicate::{Accessor, FieldRef, Predicate},
};
use model::core::data_type::DataType;
use serde_json::Value as JsonValue;
use std::{collections::HashMap, fmt};

pub mod user;

/// Builds the predicate of a derived field from the condition's raw value.
pub type VirtualBuilder<R> = fn(&JsonValue) -> Result<Predicate<R>, DropReason>;

/// A record type that filter trees can be compiled against.
pub trait Record: Sized + 'static {
    /// The registry describing the filterable fields, built once.
    fn schema() -> &'static SchemaRegistry<Self>;
}

pub struct FieldDescriptor<R> {
    pub name: &'static str,
    pub data_type: DataType,
    pub nullable: bool,
    pub accessor: Accessor<R>,
}

impl<R> FieldDescriptor<R> {
    pub fn field_ref(&self) -> FieldRef<R> {
        FieldRef {
            name: self.name,
            accessor: self.accessor,
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// A logical field that is not read directly but derived from another
/// field, e.g. `IsActive` from the `ActivationStatus` bit set.
pub struct VirtualField<R> {
    pub name: &'static str,
    pub derived_from: &'static str,
    pub build: VirtualBuilder<R>,
}

impl<R> fmt::Debug for VirtualField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualField")
            .field("name", &self.name)
            .field("derived_from", &self.derived_from)
            .finish()
    }
}

#[derive(Debug)]
pub enum Resolved<'a, R> {
    Field(&'a FieldDescriptor<R>),
    Virtual(&'a VirtualField<R>),
}

/// Case-insensitive lookup from logical field names to field metadata.
///
/// Resolution order: virtual fields, then the alias table, then the record's
/// own fields.
pub struct SchemaRegistry<R> {
    record: &'static str,
    fields: Vec<FieldDescriptor<R>>,
    by_name: HashMap<String, usize>,
    aliases: HashMap<String, (&'static str, &'static str)>,
    virtuals: HashMap<String, VirtualField<R>>,
}

impl<R> SchemaRegistry<R> {
    pub fn builder(record: &'static str) -> SchemaBuilder<R> {
        SchemaBuilder {
            registry: SchemaRegistry {
                record,
                fields: Vec::new(),
                by_name: HashMap::new(),
                aliases: HashMap::new(),
                virtuals: HashMap::new(),
            },
        }
    }

    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn resolve(&self, name: &str) -> Option<Resolved<'_, R>> {
        let key = normalize(name);
        if let Some(virtual_field) = self.virtuals.get(&key) {
            return Some(Resolved::Virtual(virtual_field));
        }

        self.field(self.alias_of(name).unwrap_or(name))
            .map(Resolved::Field)
    }

    /// Look up a stored field by its own name, bypassing aliases.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.by_name
            .get(&normalize(name))
            .map(|index| &self.fields[*index])
    }

    /// Physical field a logical name maps to, if it is aliased.
    pub fn alias_of(&self, name: &str) -> Option<&'static str> {
        self.aliases.get(&normalize(name)).map(|(_, physical)| *physical)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor<R>> {
        self.fields.iter()
    }

    /// `(logical, physical)` pairs as registered, in no particular order.
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.aliases.values().copied()
    }

    pub fn virtual_fields(&self) -> impl Iterator<Item = &VirtualField<R>> {
        self.virtuals.values()
    }
}

pub struct SchemaBuilder<R> {
    registry: SchemaRegistry<R>,
}

impl<R> SchemaBuilder<R> {
    pub fn field(self, name: &'static str, data_type: DataType, accessor: Accessor<R>) -> Self {
        self.push(name, data_type, false, accessor)
    }

    pub fn nullable(self, name: &'static str, data_type: DataType, accessor: Accessor<R>) -> Self {
        self.push(name, data_type, true, accessor)
    }

    pub fn alias(mut self, logical: &'static str, physical: &'static str) -> Self {
        self.registry
            .aliases
            .insert(normalize(logical), (logical, physical));
        self
    }

    /// Register a derived field. Its name also becomes an alias of the field
    /// it is derived from.
    pub fn virtual_field(
        mut self,
        name: &'static str,
        derived_from: &'static str,
        build: VirtualBuilder<R>,
    ) -> Self {
        self.registry
            .aliases
            .insert(normalize(name), (name, derived_from));
        self.registry.virtuals.insert(
            normalize(name),
            VirtualField {
                name,
                derived_from,
                build,
            },
        );
        self
    }

    pub fn build(self) -> SchemaRegistry<R> {
        self.registry
    }

    fn push(
        mut self,
        name: &'static str,
        data_type: DataType,
        nullable: bool,
        accessor: Accessor<R>,
    ) -> Self {
        let registry = &mut self.registry;
        let index = match registry.by_name.get(&normalize(name)) {
            Some(&existing) => {
                registry.fields[existing] = FieldDescriptor {
                    name,
                    data_type,
                    nullable,
                    accessor,
                };
                existing
            }
            None => {
                registry.fields.push(FieldDescriptor {
                    name,
                    data_type,
                    nullable,
                    accessor,
                });
                registry.fields.len() - 1
            }
        };
        registry.by_name.insert(normalize(name), index);
        self
    }
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;

    #[derive(Debug)]
    struct Sample {
        code: String,
        flags: i64,
    }

    fn has_low_bit(value: &JsonValue) -> Result<Predicate<Sample>, DropReason> {
        let expected = value
            .as_bool()
            .ok_or_else(|| DropReason::ExpectedBoolean("IsOdd".into()))?;
        let test = Predicate::Test("IsOdd", |s: &Sample| s.flags & 1 == 1);
        Ok(if expected { test } else { test.negate() })
    }

    fn registry() -> SchemaRegistry<Sample> {
        SchemaRegistry::<Sample>::builder("Sample")
            .field("Code", DataType::String, |s| Value::String(s.code.clone()))
            .field("Flags", DataType::Long, |s| Value::Int(s.flags))
            .alias("Identifier", "Code")
            .virtual_field("IsOdd", "Flags", has_low_bit)
            .build()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = registry();
        for name in ["Code", "code", "CODE", "cOdE"] {
            match registry.resolve(name) {
                Some(Resolved::Field(field)) => assert_eq!(field.name, "Code"),
                other => panic!("unexpected resolution for {name}: {other:?}"),
            }
        }
        assert!(registry.resolve("Missing").is_none());
    }

    #[test]
    fn test_alias_substitutes_physical_name() {
        let registry = registry();
        assert_eq!(registry.alias_of("identifier"), Some("Code"));
        assert!(matches!(
            registry.resolve("IDENTIFIER"),
            Some(Resolved::Field(field)) if field.name == "Code"
        ));
        // Aliases are not fields of their own
        assert!(registry.field("Identifier").is_none());
    }

    #[test]
    fn test_virtual_field_wins_over_alias() {
        let registry = registry();
        assert_eq!(registry.alias_of("isodd"), Some("Flags"));

        let Some(Resolved::Virtual(virtual_field)) = registry.resolve("isOdd") else {
            panic!("IsOdd should resolve to a virtual field");
        };
        assert_eq!(virtual_field.derived_from, "Flags");

        let odd = Sample {
            code: "a".into(),
            flags: 3,
        };
        let predicate = (virtual_field.build)(&JsonValue::Bool(true)).unwrap();
        assert!(predicate.evaluate(&odd));
        let negated = (virtual_field.build)(&JsonValue::Bool(false)).unwrap();
        assert!(!negated.evaluate(&odd));
        assert!((virtual_field.build)(&JsonValue::from("yes")).is_err());
    }

    #[test]
    fn test_redefining_a_field_replaces_it() {
        let registry = SchemaRegistry::<Sample>::builder("Sample")
            .field("Code", DataType::String, |s| Value::String(s.code.clone()))
            .nullable("code", DataType::String, |_| Value::Null)
            .build();
        assert_eq!(registry.fields().count(), 1);
        assert!(registry.field("CODE").unwrap().nullable);
    }
}
