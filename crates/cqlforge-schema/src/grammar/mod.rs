//! DDL grammars.
//!
//! A grammar is a stateless translator from queued schema commands to the
//! exact statement text the target dialect accepts. Grammars hold only
//! static dialect metadata, so one instance can be shared across threads
//! and reused for every compilation.

mod cql;

pub use cql::CqlGrammar;

use crate::blueprint::Blueprint;
use crate::column::{ColumnSpec, CqlType};
use crate::command::SchemaCommand;
use crate::error::Result;

/// Trait for dialect-specific DDL generation.
pub trait SchemaGrammar: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Compiles one command into the statement(s) that realize it.
    ///
    /// Returns [`SchemaError::UnsupportedCommand`](crate::error::SchemaError)
    /// for a command kind this dialect has no compiler for; a command is
    /// never silently dropped.
    fn compile(&self, blueprint: &Blueprint, command: &SchemaCommand) -> Result<Vec<String>>;

    /// Returns the dialect type name for a declared column type.
    fn type_name(&self, column_type: &CqlType) -> String;

    /// Renders one column definition.
    fn column_definition(&self, column: &ColumnSpec) -> String {
        format!(
            "{} {}",
            self.wrap(&column.name),
            self.type_name(&column.column_type)
        )
    }

    /// Wraps an identifier in double quotes, doubling embedded quotes.
    ///
    /// The literal wildcard `*` passes through unquoted.
    fn wrap(&self, value: &str) -> String {
        if value == "*" {
            value.to_owned()
        } else {
            format!("\"{}\"", value.replace('"', "\"\""))
        }
    }
}
