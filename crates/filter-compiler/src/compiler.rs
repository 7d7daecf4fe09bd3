use crate::{
    coerce::{coerce, coerce_list},
    diagnostics::{self, DroppedCondition, ROOT_PATH},
    error::{DropReason, Result},
    operator::{CompareOp, LogicalOp},
    payload::{LogicalGroup, SearchCondition, SearchPayload},
    predicate::{Comparison, Predicate, TextMatch},
    schema::{FieldDescriptor, Record, Resolved, SchemaRegistry},
    settings::CompilerSettings,
};
use model::core::value::Value;
use regex::Regex;
use serde_json::Value as JsonValue;
use tracing::debug;

/// A trait for compiling search payloads into a specific filter form.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    fn compile(&self, payload: &SearchPayload) -> Self::Filter;
}

/// The outcome of compiling a payload: the predicate and every part of the
/// payload that did not make it in.
#[derive(Debug)]
pub struct Compilation<R> {
    pub predicate: Predicate<R>,
    pub dropped: Vec<DroppedCondition>,
}

impl<R> Compilation<R> {
    pub fn evaluate(&self, record: &R) -> bool {
        self.predicate.evaluate(record)
    }

    /// True when nothing in the payload was dropped.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Compiles filter trees against a record's schema. Never fails: invalid
/// conditions are dropped and reported.
pub struct PredicateCompiler<'a, R> {
    schema: &'a SchemaRegistry<R>,
    settings: CompilerSettings,
}

impl<R: Record> PredicateCompiler<'static, R> {
    pub fn for_record(settings: CompilerSettings) -> Self {
        PredicateCompiler::new(R::schema(), settings)
    }
}

impl<'a, R> FilterCompiler for PredicateCompiler<'a, R> {
    type Filter = Compilation<R>;

    fn compile(&self, payload: &SearchPayload) -> Compilation<R> {
        let mut dropped = Vec::new();
        let predicate = match &payload.root_group {
            Some(root) => self.compile_group(root, ROOT_PATH, 1, &mut dropped),
            None => {
                debug!("Search payload has no root group; matching every record");
                Predicate::Const(true)
            }
        };

        debug!(
            "Compiled {} filter: {} (dropped {})",
            self.schema.record_name(),
            predicate,
            dropped.len()
        );
        Compilation { predicate, dropped }
    }
}

impl<'a, R> PredicateCompiler<'a, R> {
    pub fn new(schema: &'a SchemaRegistry<R>, settings: CompilerSettings) -> Self {
        PredicateCompiler { schema, settings }
    }

    /// Compile one group. `depth` is the nesting level of `group` itself,
    /// starting at 1 for the root.
    pub fn compile_group(
        &self,
        group: &LogicalGroup,
        path: &str,
        depth: usize,
        dropped: &mut Vec<DroppedCondition>,
    ) -> Predicate<R> {
        let mut fragments = Vec::with_capacity(group.conditions.len() + group.groups.len());

        for (index, condition) in group.conditions.iter().enumerate() {
            match self.compile_condition(condition) {
                Ok(fragment) => fragments.push(fragment),
                Err(reason) => {
                    let path = diagnostics::condition_path(path, index);
                    debug!("Dropped condition at {}: {}", path, reason);
                    dropped.push(DroppedCondition::condition(
                        path,
                        &condition.field,
                        &condition.operator,
                        reason,
                    ));
                }
            }
        }

        for (index, nested) in group.groups.iter().enumerate() {
            let path = diagnostics::group_path(path, index);
            if depth >= self.settings.max_depth {
                let reason = DropReason::DepthExceeded {
                    limit: self.settings.max_depth,
                };
                debug!("Dropped group at {}: {}", path, reason);
                dropped.push(DroppedCondition::group(path, reason));
                continue;
            }
            fragments.push(self.compile_group(nested, &path, depth + 1, dropped));
        }

        combine(group.logical_op(), fragments)
    }

    pub fn compile_condition(
        &self,
        condition: &SearchCondition,
    ) -> std::result::Result<Predicate<R>, DropReason> {
        if condition.field.trim().is_empty() {
            return Err(DropReason::EmptyField);
        }
        let value = condition
            .value
            .as_ref()
            .filter(|value| !value.is_null())
            .ok_or(DropReason::NullValue)?;

        let field = match self.schema.resolve(&condition.field) {
            Some(Resolved::Field(field)) => field,
            Some(Resolved::Virtual(virtual_field)) => return (virtual_field.build)(value),
            None => return Err(DropReason::UnknownField(condition.field.clone())),
        };

        build_fragment(field, CompareOp::parse_or_default(&condition.operator), value)
    }
}

fn build_fragment<R>(
    field: &FieldDescriptor<R>,
    op: CompareOp,
    value: &JsonValue,
) -> std::result::Result<Predicate<R>, DropReason> {
    let data_type = &field.data_type;
    if (op.is_ordering() && !data_type.is_ordered()) || (op.is_text() && !data_type.is_text()) {
        return Err(DropReason::UnsupportedOperator {
            field: field.name.to_string(),
            operator: op.token().to_string(),
            data_type: data_type.to_string(),
        });
    }

    let target = field.field_ref();
    let compare = |comparison: Comparison| -> std::result::Result<Predicate<R>, DropReason> {
        Ok(Predicate::Compare(target, comparison, coerce(value, data_type)?))
    };
    let text = |kind: TextMatch| -> std::result::Result<Predicate<R>, DropReason> {
        Ok(Predicate::Text(target, kind, text_operand(coerce(value, data_type)?)))
    };

    match op {
        CompareOp::Equals => compare(Comparison::Eq),
        CompareOp::NotEquals => compare(Comparison::Ne),
        CompareOp::GreaterThan => compare(Comparison::Gt),
        CompareOp::GreaterThanOrEqual => compare(Comparison::Ge),
        CompareOp::LessThan => compare(Comparison::Lt),
        CompareOp::LessThanOrEqual => compare(Comparison::Le),
        CompareOp::StartsWith => text(TextMatch::StartsWith),
        CompareOp::EndsWith => text(TextMatch::EndsWith),
        CompareOp::Contains => text(TextMatch::Contains),
        CompareOp::NotContains => Ok(text(TextMatch::Contains)?.negate()),

        CompareOp::Matches => {
            let pattern = text_operand(coerce(value, data_type)?);
            let regex = Regex::new(&pattern).map_err(|e| DropReason::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            Ok(Predicate::Regex(target, regex))
        }

        CompareOp::In | CompareOp::NotIn => {
            let values = coerce_list(value, data_type)?;
            if values.is_empty() {
                return Err(DropReason::InvalidList {
                    operator: op.token().to_string(),
                    message: "list is empty".to_string(),
                });
            }
            let membership = Predicate::In(target, values);
            Ok(if op == CompareOp::In {
                membership
            } else {
                membership.negate()
            })
        }

        CompareOp::Between => {
            let [low, high] = match value {
                JsonValue::Array(bounds) if bounds.len() == 2 => [&bounds[0], &bounds[1]],
                _ => {
                    return Err(DropReason::InvalidList {
                        operator: op.token().to_string(),
                        message: "expected [low, high]".to_string(),
                    });
                }
            };
            Ok(Predicate::Between(
                target,
                coerce(low, data_type)?,
                coerce(high, data_type)?,
            ))
        }

        CompareOp::IsNull => Ok(Predicate::IsNull(target)),
        CompareOp::IsNotNull => Ok(Predicate::IsNull(target).negate()),
    }
}

fn text_operand(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Combine fragments left to right. No fragments accept everything; a single
/// fragment is returned as is.
fn combine<R>(op: LogicalOp, mut fragments: Vec<Predicate<R>>) -> Predicate<R> {
    match fragments.len() {
        0 => Predicate::Const(true),
        1 => fragments.remove(0),
        _ => match op {
            LogicalOp::And => Predicate::And(fragments),
            LogicalOp::Or => Predicate::Or(fragments),
        },
    }
}

/// Compile `payload` against `R`'s schema with default settings.
pub fn compile<R: Record>(payload: &SearchPayload) -> Compilation<R> {
    PredicateCompiler::<R>::for_record(CompilerSettings::default()).compile(payload)
}

/// Decode a JSON search payload and compile it with default settings.
pub fn compile_json<R: Record>(json: &str) -> Result<Compilation<R>> {
    Ok(compile(&SearchPayload::from_json(json)?))
}
