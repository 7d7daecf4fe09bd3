//! Compiles JSON filter trees (nested AND/OR groups of field conditions)
//! into predicates over a typed record.
//!
//! Compilation is fail-open: a condition that cannot be compiled is dropped
//! and reported in [`Compilation::dropped`], never turned into an error.

pub mod coerce;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod operator;
pub mod payload;
pub mod predicate;
pub mod schema;
pub mod settings;

pub use coerce::coerce;
pub use compiler::{Compilation, FilterCompiler, PredicateCompiler, compile, compile_json};
pub use diagnostics::DroppedCondition;
pub use error::{CoercionError, DropReason, FilterError};
pub use operator::{CompareOp, LogicalOp};
pub use payload::{LogicalGroup, SearchCondition, SearchPayload};
pub use predicate::Predicate;
pub use schema::{FieldDescriptor, Record, Resolved, SchemaRegistry, VirtualField};
pub use settings::CompilerSettings;
