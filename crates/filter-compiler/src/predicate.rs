use model::core::value::Value;
use regex::Regex;
use std::{cmp::Ordering, fmt};

/// Reads one field of a record as a typed [`Value`].
pub type Accessor<R> = fn(&R) -> Value;

/// A boolean test computed directly from a record.
pub type RecordTest<R> = fn(&R) -> bool;

/// A resolved field: its canonical name and typed accessor.
pub struct FieldRef<R> {
    pub name: &'static str,
    pub accessor: Accessor<R>,
}

impl<R> FieldRef<R> {
    pub fn read(&self, record: &R) -> Value {
        (self.accessor)(record)
    }
}

impl<R> Clone for FieldRef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldRef<R> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    fn symbol(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    StartsWith,
    EndsWith,
    Contains,
}

/// Compiled filter over records of type `R`.
///
/// `And`/`Or` evaluate their children left to right and short-circuit.
pub enum Predicate<R> {
    Const(bool),
    Compare(FieldRef<R>, Comparison, Value),
    /// Ordinal substring test; a null field never matches.
    Text(FieldRef<R>, TextMatch, String),
    Regex(FieldRef<R>, Regex),
    In(FieldRef<R>, Vec<Value>),
    /// Inclusive on both ends.
    Between(FieldRef<R>, Value, Value),
    IsNull(FieldRef<R>),
    /// Derived test registered by a virtual field.
    Test(&'static str, RecordTest<R>),
    Not(Box<Predicate<R>>),
    And(Vec<Predicate<R>>),
    Or(Vec<Predicate<R>>),
}

impl<R> Predicate<R> {
    pub fn evaluate(&self, record: &R) -> bool {
        match self {
            Predicate::Const(value) => *value,

            Predicate::Compare(field, op, expected) => {
                let actual = field.read(record);
                match op {
                    // A null field equals nothing and differs from everything
                    Comparison::Eq => actual.equal(expected),
                    Comparison::Ne => !actual.equal(expected),
                    Comparison::Gt => actual.compare(expected) == Some(Ordering::Greater),
                    Comparison::Ge => matches!(
                        actual.compare(expected),
                        Some(Ordering::Greater | Ordering::Equal)
                    ),
                    Comparison::Lt => actual.compare(expected) == Some(Ordering::Less),
                    Comparison::Le => matches!(
                        actual.compare(expected),
                        Some(Ordering::Less | Ordering::Equal)
                    ),
                }
            }

            Predicate::Text(field, kind, pattern) => match field.read(record) {
                Value::String(actual) => match kind {
                    TextMatch::StartsWith => actual.starts_with(pattern.as_str()),
                    TextMatch::EndsWith => actual.ends_with(pattern.as_str()),
                    TextMatch::Contains => actual.contains(pattern.as_str()),
                },
                _ => false,
            },

            Predicate::Regex(field, regex) => field
                .read(record)
                .as_str()
                .is_some_and(|actual| regex.is_match(actual)),

            Predicate::In(field, values) => {
                let actual = field.read(record);
                values.iter().any(|value| actual.equal(value))
            }

            Predicate::Between(field, low, high) => {
                let actual = field.read(record);
                matches!(
                    actual.compare(low),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(actual.compare(high), Some(Ordering::Less | Ordering::Equal))
            }

            Predicate::IsNull(field) => field.read(record).is_null(),

            Predicate::Test(_, test) => test(record),

            Predicate::Not(inner) => !inner.evaluate(record),

            Predicate::And(children) => children.iter().all(|child| child.evaluate(record)),

            Predicate::Or(children) => children.iter().any(|child| child.evaluate(record)),
        }
    }

    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Keep the records this predicate accepts, preserving order.
    pub fn filter<'a, I>(&self, records: I) -> Vec<&'a R>
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        records
            .into_iter()
            .filter(|record| self.evaluate(record))
            .collect()
    }

    /// Whether this predicate accepts every record without looking at it.
    pub fn is_always_true(&self) -> bool {
        matches!(self, Predicate::Const(true))
    }

    /// Number of leaf tests, ignoring constants.
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::Const(_) => 0,
            Predicate::Not(inner) => inner.leaf_count(),
            Predicate::And(children) | Predicate::Or(children) => {
                children.iter().map(Predicate::leaf_count).sum()
            }
            _ => 1,
        }
    }
}

impl<R> fmt::Display for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Const(true) => write!(f, "TRUE"),
            Predicate::Const(false) => write!(f, "FALSE"),
            Predicate::Compare(field, op, value) => {
                write!(f, "{} {} {}", field.name, op.symbol(), value)
            }
            Predicate::Text(field, kind, pattern) => {
                let keyword = match kind {
                    TextMatch::StartsWith => "STARTS WITH",
                    TextMatch::EndsWith => "ENDS WITH",
                    TextMatch::Contains => "CONTAINS",
                };
                write!(f, "{} {} '{}'", field.name, keyword, pattern.replace('\'', "''"))
            }
            Predicate::Regex(field, regex) => write!(f, "{} MATCHES /{}/", field.name, regex),
            Predicate::In(field, values) => {
                let list = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{} IN ({})", field.name, list)
            }
            Predicate::Between(field, low, high) => {
                write!(f, "{} BETWEEN {} AND {}", field.name, low, high)
            }
            Predicate::IsNull(field) => write!(f, "{} IS NULL", field.name),
            Predicate::Test(label, _) => write!(f, "{label}"),
            Predicate::Not(inner) => write!(f, "NOT ({inner})"),
            Predicate::And(children) => write_joined(f, children, " AND "),
            Predicate::Or(children) => write_joined(f, children, " OR "),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({self})")
    }
}

fn write_joined<R>(
    f: &mut fmt::Formatter<'_>,
    children: &[Predicate<R>],
    separator: &str,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: Option<String>,
        size: i64,
    }

    fn name() -> FieldRef<Item> {
        FieldRef {
            name: "Name",
            accessor: |item: &Item| item.name.clone().map(Value::String).into(),
        }
    }

    fn size() -> FieldRef<Item> {
        FieldRef {
            name: "Size",
            accessor: |item: &Item| Value::Int(item.size),
        }
    }

    fn item(name: Option<&str>, size: i64) -> Item {
        Item {
            name: name.map(str::to_string),
            size,
        }
    }

    #[test]
    fn test_comparisons() {
        let small = item(Some("a"), 1);
        let large = item(Some("b"), 10);

        let gt = Predicate::Compare(size(), Comparison::Gt, Value::Int(5));
        assert!(!gt.evaluate(&small));
        assert!(gt.evaluate(&large));

        let le = Predicate::Compare(size(), Comparison::Le, Value::Int32(10));
        assert!(le.evaluate(&small));
        assert!(le.evaluate(&large));
    }

    #[test]
    fn test_null_field_semantics() {
        let nameless = item(None, 1);
        let value = Value::String("x".into());

        assert!(!Predicate::Compare(name(), Comparison::Eq, value.clone()).evaluate(&nameless));
        assert!(Predicate::Compare(name(), Comparison::Ne, value.clone()).evaluate(&nameless));
        assert!(!Predicate::Compare(name(), Comparison::Gt, value).evaluate(&nameless));
        assert!(
            !Predicate::Text(name(), TextMatch::StartsWith, "I".into()).evaluate(&nameless)
        );
        assert!(Predicate::IsNull(name()).evaluate(&nameless));
    }

    #[test]
    fn test_text_matching_is_case_sensitive() {
        let ivan = item(Some("Ivan"), 1);
        assert!(Predicate::Text(name(), TextMatch::StartsWith, "Iv".into()).evaluate(&ivan));
        assert!(!Predicate::Text(name(), TextMatch::StartsWith, "iv".into()).evaluate(&ivan));
        assert!(Predicate::Text(name(), TextMatch::EndsWith, "an".into()).evaluate(&ivan));
        assert!(Predicate::Text(name(), TextMatch::Contains, "va".into()).evaluate(&ivan));
    }

    #[test]
    fn test_short_circuit_order() {
        fn boom(_: &Item) -> bool {
            panic!("must not be evaluated")
        }

        let record = item(Some("a"), 1);
        let and = Predicate::And(vec![Predicate::Const(false), Predicate::Test("boom", boom)]);
        assert!(!and.evaluate(&record));

        let or = Predicate::Or(vec![Predicate::Const(true), Predicate::Test("boom", boom)]);
        assert!(or.evaluate(&record));
    }

    #[test]
    fn test_between_and_in() {
        let record = item(Some("b"), 5);
        assert!(Predicate::Between(size(), Value::Int(5), Value::Int(10)).evaluate(&record));
        assert!(!Predicate::Between(size(), Value::Int(6), Value::Int(10)).evaluate(&record));
        assert!(
            Predicate::In(name(), vec![Value::String("a".into()), Value::String("b".into())])
                .evaluate(&record)
        );
    }

    #[test]
    fn test_display() {
        let predicate = Predicate::Or(vec![
            Predicate::Compare(size(), Comparison::Ge, Value::Int(3)),
            Predicate::Text(name(), TextMatch::Contains, "x".into()).negate(),
        ]);
        assert_eq!(predicate.to_string(), "(Size >= 3 OR NOT (Name CONTAINS 'x'))");
        assert_eq!(predicate.leaf_count(), 2);
    }

    #[test]
    fn test_filter_keeps_order() {
        let records = vec![item(Some("a"), 3), item(Some("b"), 1), item(Some("c"), 7)];
        let predicate = Predicate::Compare(size(), Comparison::Gt, Value::Int(2));
        let names = predicate
            .filter(&records)
            .into_iter()
            .map(|r| r.name.clone().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "c"]);
    }
}
