//! The blueprint: a per-table accumulator of declared columns, keys, and
//! structural commands.
//!
//! A blueprint is created for one table-mutation request, populated by a
//! single declaration pass, finalized exactly once, then discarded. It is
//! never persisted and must not be shared across threads mid-declaration.

use std::collections::HashSet;

use serde_json::Value;

use crate::column::{ColumnSpec, CqlType, InlineIndex};
use crate::command::{KeyPart, SchemaCommand};
use crate::error::{Result, SchemaError};
use crate::grammar::SchemaGrammar;

/// A fluent accumulator for one table mutation.
///
/// Declarations are append-only; [`Blueprint::finalize`] derives the
/// commands implied by column-level state (added/changed columns, inline
/// `primary`/`index` shorthands) and fixes the final command order.
///
/// ```rust
/// use cqlforge_schema::blueprint::Blueprint;
/// use cqlforge_schema::grammar::CqlGrammar;
///
/// let mut table = Blueprint::new("users");
/// table.create();
/// table.uuid("id").primary();
/// table.text("email");
///
/// let statements = table.to_statements(&CqlGrammar::new()).unwrap();
/// assert_eq!(
///     statements,
///     ["create table \"users\" (\"id\" uuid, \"email\" text, PRIMARY KEY (\"id\"))"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Blueprint {
    table: String,
    columns: Vec<ColumnSpec>,
    commands: Vec<SchemaCommand>,
    options: Vec<(String, Value)>,
    temporary: bool,
    primary_columns: Vec<KeyPart>,
}

impl Blueprint {
    /// Creates a new blueprint for the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            commands: Vec::new(),
            options: Vec::new(),
            temporary: false,
            primary_columns: Vec::new(),
        }
    }

    // =============================================================================
    // Column declarations
    // =============================================================================

    /// Declares a column and returns it for modifier chaining.
    ///
    /// Declaration is append-only; a duplicate name is only rejected at
    /// [`Blueprint::finalize`] time, once drops and removals are known.
    pub fn column(&mut self, column_type: CqlType, name: impl Into<String>) -> &mut ColumnSpec {
        self.columns.push(ColumnSpec::new(column_type, name));
        self.columns.last_mut().expect("column was just pushed")
    }

    /// Declares a text column.
    pub fn text(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Text, name)
    }

    /// Declares a text column. Alias of [`Blueprint::text`]; the dialect has
    /// no bounded string type.
    pub fn string(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.text(name)
    }

    /// Declares a 32-bit integer column.
    pub fn integer(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Integer, name)
    }

    /// Declares a 64-bit integer column.
    pub fn big_integer(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::BigInt, name)
    }

    /// Declares a single-precision float column.
    pub fn float(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Float, name)
    }

    /// Declares a double-precision float column.
    pub fn double(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Double, name)
    }

    /// Declares a boolean column.
    pub fn boolean(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Boolean, name)
    }

    /// Declares a timestamp column.
    pub fn timestamp(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Timestamp, name)
    }

    /// Declares a timestamp column. Alias of [`Blueprint::timestamp`].
    pub fn datetime(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.timestamp(name)
    }

    /// Declares a blob column.
    pub fn binary(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Blob, name)
    }

    /// Declares a UUID column.
    pub fn uuid(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Uuid, name)
    }

    /// Declares a time-based UUID column.
    pub fn time_uuid(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::TimeUuid, name)
    }

    /// Declares an IP address column.
    pub fn ip_address(&mut self, name: impl Into<String>) -> &mut ColumnSpec {
        self.column(CqlType::Inet, name)
    }

    /// Declares a column with a dialect-native type name.
    pub fn custom(
        &mut self,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> &mut ColumnSpec {
        self.column(CqlType::Custom(type_name.into()), name)
    }

    /// Declares nullable `created_at` and `updated_at` timestamp columns.
    pub fn timestamps(&mut self) {
        self.timestamp("created_at").nullable();
        self.timestamp("updated_at").nullable();
    }

    /// Alias of [`Blueprint::timestamps`].
    pub fn nullable_timestamps(&mut self) {
        self.timestamps();
    }

    /// Declares a nullable `deleted_at` timestamp column.
    pub fn soft_deletes(&mut self) -> &mut ColumnSpec {
        self.timestamp("deleted_at").nullable()
    }

    /// Withdraws a pending column declaration.
    ///
    /// Only affects specs declared on this blueprint; it does not queue a
    /// `drop column` against the live table.
    pub fn remove_column(&mut self, name: &str) -> &mut Self {
        self.columns.retain(|column| column.name != name);
        self
    }

    // =============================================================================
    // Keys and indexes
    // =============================================================================

    /// Records the primary key as a flat sequence of columns.
    ///
    /// Overwrites any previously recorded key; no command is queued, the
    /// key is consumed by the `create` compilation.
    pub fn primary(&mut self, columns: &[&str]) {
        self.primary_columns = columns
            .iter()
            .map(|&column| KeyPart::Column(column.to_owned()))
            .collect();
    }

    /// Records a primary key with an explicit partition-key group followed
    /// by clustering columns.
    pub fn primary_with_partition(&mut self, partition: &[&str], clustering: &[&str]) {
        let mut parts = vec![KeyPart::group(partition.iter().copied())];
        parts.extend(
            clustering
                .iter()
                .map(|&column| KeyPart::Column(column.to_owned())),
        );
        self.primary_columns = parts;
    }

    /// Records the primary key from pre-built parts.
    pub fn primary_parts(&mut self, parts: Vec<KeyPart>) {
        self.primary_columns = parts;
    }

    /// Queues an auto-named secondary index on the given columns.
    ///
    /// The conventional name is
    /// `lowercase(table + "_" + columns joined by "_" + "_index")` with `-`
    /// and `.` replaced by `_`.
    pub fn index(&mut self, columns: &[&str]) {
        self.index_with(columns, None, None, None);
    }

    /// Queues a secondary index with an explicit name.
    pub fn index_named(&mut self, columns: &[&str], name: impl Into<String>) {
        let name = name.into();
        self.index_with(columns, Some(&name), None, None);
    }

    /// Queues a secondary index with full control over name, algorithm, and
    /// options.
    pub fn index_with(
        &mut self,
        columns: &[&str],
        name: Option<&str>,
        algorithm: Option<&str>,
        options: Option<Value>,
    ) {
        let name = name.map_or_else(|| self.index_name(columns), str::to_owned);
        self.commands.push(SchemaCommand::Index {
            name,
            columns: columns.iter().map(|&column| column.to_owned()).collect(),
            algorithm: algorithm.map(str::to_owned),
            options,
        });
    }

    /// Queues dropping the index conventionally named for the given columns.
    pub fn drop_index(&mut self, columns: &[&str]) {
        let name = self.index_name(columns);
        self.commands.push(SchemaCommand::DropIndex { name });
    }

    /// Queues dropping an index by explicit name.
    pub fn drop_index_named(&mut self, name: impl Into<String>) {
        self.commands.push(SchemaCommand::DropIndex { name: name.into() });
    }

    fn index_name(&self, columns: &[&str]) -> String {
        let name = format!("{}_{}_index", self.table, columns.join("_")).to_lowercase();
        name.replace(['-', '.'], "_")
    }

    // =============================================================================
    // Table commands
    // =============================================================================

    /// Marks the table for creation.
    pub fn create(&mut self) {
        self.commands.push(SchemaCommand::Create);
    }

    /// Requests a temporary table.
    ///
    /// The CQL dialect has no temporary tables; combined with
    /// [`Blueprint::create`] this makes [`Blueprint::finalize`] fail fast.
    pub fn temporary(&mut self) {
        self.temporary = true;
    }

    /// Queues dropping the table.
    #[allow(clippy::should_implement_trait)]
    pub fn drop(&mut self) {
        self.commands.push(SchemaCommand::Drop);
    }

    /// Queues dropping the table if it exists.
    pub fn drop_if_exists(&mut self) {
        self.commands.push(SchemaCommand::DropIfExists);
    }

    /// Queues dropping the given columns.
    pub fn drop_column(&mut self, columns: &[&str]) {
        self.commands.push(SchemaCommand::DropColumn {
            columns: columns.iter().map(|&column| column.to_owned()).collect(),
        });
    }

    /// Queues dropping the `created_at` and `updated_at` columns.
    pub fn drop_timestamps(&mut self) {
        self.drop_column(&["created_at", "updated_at"]);
    }

    /// Queues dropping the `deleted_at` column.
    pub fn drop_soft_deletes(&mut self) {
        self.drop_column(&["deleted_at"]);
    }

    /// Queues renaming a column.
    pub fn rename_column(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.commands.push(SchemaCommand::RenameColumn {
            from: from.into(),
            to: to.into(),
        });
    }

    /// Queues renaming the table.
    pub fn rename(&mut self, to: impl Into<String>) {
        self.commands.push(SchemaCommand::Rename { to: to.into() });
    }

    /// Records a table-level option, serialized into the `WITH` clause in
    /// insertion order.
    pub fn with_option(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.options.push((name.into(), value));
        self
    }

    // =============================================================================
    // Accessors
    // =============================================================================

    /// Returns the table this blueprint describes.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the declared columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Returns the queued commands.
    #[must_use]
    pub fn commands(&self) -> &[SchemaCommand] {
        &self.commands
    }

    /// Returns the table-level options in insertion order.
    #[must_use]
    pub fn options(&self) -> &[(String, Value)] {
        &self.options
    }

    /// Returns the recorded primary key parts.
    #[must_use]
    pub fn primary_columns(&self) -> &[KeyPart] {
        &self.primary_columns
    }

    /// Returns the declared columns that add to the table.
    #[must_use]
    pub fn added_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|column| !column.change).collect()
    }

    /// Returns the declared columns that modify existing columns.
    #[must_use]
    pub fn changed_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|column| column.change).collect()
    }

    /// Returns true iff this blueprint creates its table.
    #[must_use]
    pub fn creating(&self) -> bool {
        self.commands
            .iter()
            .any(|command| matches!(command, SchemaCommand::Create))
    }

    // =============================================================================
    // Finalization
    // =============================================================================

    /// Derives the commands implied by the blueprint's state and returns
    /// the final ordered command list.
    ///
    /// Must be called exactly once per blueprint:
    ///
    /// 1. fail fast on a temporary `create` and on duplicate live columns;
    /// 2. prepend an `Add` command if the table is not being created and
    ///    columns were declared;
    /// 3. prepend a `Change` command (ahead of `Add`) for changed columns
    ///    under the same condition;
    /// 4. expand each column's inline `primary`/`index` shorthand, checking
    ///    `primary` first; the first match consumes the column.
    pub fn finalize(&mut self) -> Result<&[SchemaCommand]> {
        if self.creating() && self.temporary {
            return Err(SchemaError::UnsupportedOperation(format!(
                "temporary table '{}' requested, but the dialect has no temporary tables",
                self.table
            )));
        }
        self.check_duplicate_columns()?;
        self.add_implied_commands();
        self.add_inline_indexes();
        Ok(&self.commands)
    }

    /// Finalizes, then compiles every command in order through the grammar.
    ///
    /// Purely computational; no statement is executed here.
    pub fn to_statements<G: SchemaGrammar>(&mut self, grammar: &G) -> Result<Vec<String>> {
        self.finalize()?;

        let mut statements = Vec::new();
        for command in &self.commands {
            statements.extend(grammar.compile(self, command)?);
        }
        Ok(statements)
    }

    fn check_duplicate_columns(&self) -> Result<()> {
        let dropped: HashSet<&str> = self
            .commands
            .iter()
            .filter_map(|command| match command {
                SchemaCommand::DropColumn { columns } => {
                    Some(columns.iter().map(String::as_str))
                }
                _ => None,
            })
            .flatten()
            .collect();

        let mut seen = HashSet::new();
        for column in &self.columns {
            if dropped.contains(column.name.as_str()) {
                continue;
            }
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.table.clone(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn add_implied_commands(&mut self) {
        if self.creating() {
            return;
        }
        if !self.added_columns().is_empty() {
            self.commands.insert(0, SchemaCommand::Add);
        }
        // Change lands ahead of Add.
        if !self.changed_columns().is_empty() {
            self.commands.insert(0, SchemaCommand::Change);
        }
    }

    fn add_inline_indexes(&mut self) {
        let mut keys = Vec::new();
        let mut indexes = Vec::new();

        for column in &self.columns {
            // Fixed check order: primary before index, first match wins.
            if column.primary.is_some() {
                keys.push(column.name.clone());
                continue;
            }
            if let Some(flag) = &column.index {
                let name = match flag {
                    InlineIndex::Named(name) => Some(name.clone()),
                    InlineIndex::Auto => None,
                };
                indexes.push((column.name.clone(), name));
            }
        }

        // Each shorthand expands exactly as the explicit declaration would;
        // repeated primary declarations overwrite (last write wins).
        for key in keys {
            self.primary(&[key.as_str()]);
        }
        for (column, name) in indexes {
            match name {
                Some(name) => self.index_named(&[column.as_str()], name),
                None => self.index(&[column.as_str()]),
            }
        }
    }
}
