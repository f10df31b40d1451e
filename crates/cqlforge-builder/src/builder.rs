//! Schema builder orchestration.
//!
//! Drives blueprint declaration, compilation, and sequential statement
//! submission against the execution collaborator.

use cqlforge_schema::blueprint::Blueprint;
use cqlforge_schema::grammar::SchemaGrammar;
use tracing::{debug, info};

use crate::error::{BuilderError, Result};
use crate::executor::SchemaExecutor;

/// Factory producing the blueprint for a table-mutation request.
///
/// Overridable so a different command-queue implementation (for instance a
/// blueprint preloaded with keyspace-wide options) can be substituted.
pub type BlueprintResolver = Box<dyn Fn(&str) -> Blueprint + Send + Sync>;

/// Orchestrates table-existence checks and blueprint application.
///
/// Compiled statements are submitted strictly sequentially: later
/// statements may depend on the structural effects of earlier ones, so
/// there is no parallel submission and no retry at this layer.
pub struct SchemaBuilder<E, G> {
    executor: E,
    grammar: G,
    resolver: Option<BlueprintResolver>,
}

impl<E: SchemaExecutor, G: SchemaGrammar> SchemaBuilder<E, G> {
    /// Creates a new schema builder.
    pub fn new(executor: E, grammar: G) -> Self {
        Self {
            executor,
            grammar,
            resolver: None,
        }
    }

    /// Substitutes a custom blueprint factory.
    #[must_use]
    pub fn blueprint_resolver(mut self, resolver: BlueprintResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Returns the execution collaborator.
    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the grammar.
    #[must_use]
    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Returns true iff a table with exactly this name exists.
    ///
    /// Re-queries the collaborator on every call: existence can change
    /// between calls, and a stale answer is unsafe for migration tooling.
    pub async fn has_table(&self, table: &str) -> Result<bool> {
        let names = self
            .executor
            .table_names()
            .await
            .map_err(BuilderError::TableListing)?;
        Ok(names.iter().any(|name| name == table))
    }

    /// Declares a mutation of an existing table and applies it.
    pub async fn table<F>(&self, table: &str, declare: F) -> Result<()>
    where
        F: FnOnce(&mut Blueprint),
    {
        let mut blueprint = self.create_blueprint(table);
        declare(&mut blueprint);
        self.build(blueprint).await
    }

    /// Declares a new table and applies the blueprint.
    pub async fn create<F>(&self, table: &str, declare: F) -> Result<()>
    where
        F: FnOnce(&mut Blueprint),
    {
        let mut blueprint = self.create_blueprint(table);
        blueprint.create();
        declare(&mut blueprint);
        self.build(blueprint).await
    }

    /// Drops a table.
    pub async fn drop(&self, table: &str) -> Result<()> {
        let mut blueprint = self.create_blueprint(table);
        blueprint.drop();
        self.build(blueprint).await
    }

    /// Drops a table if it exists.
    pub async fn drop_if_exists(&self, table: &str) -> Result<()> {
        let mut blueprint = self.create_blueprint(table);
        blueprint.drop_if_exists();
        self.build(blueprint).await
    }

    /// Renames a table.
    ///
    /// Kept for dialect parity at the builder surface; the CQL grammar has
    /// no rename compiler, so this surfaces
    /// [`SchemaError::UnsupportedCommand`](cqlforge_schema::error::SchemaError)
    /// before anything executes.
    pub async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let mut blueprint = self.create_blueprint(from);
        blueprint.rename(to);
        self.build(blueprint).await
    }

    fn create_blueprint(&self, table: &str) -> Blueprint {
        self.resolver
            .as_ref()
            .map_or_else(|| Blueprint::new(table), |resolver| resolver(table))
    }

    async fn build(&self, mut blueprint: Blueprint) -> Result<()> {
        blueprint.finalize()?;

        // Compile everything up front; a compile error aborts the request
        // with nothing submitted.
        let mut statements = Vec::new();
        for command in blueprint.commands() {
            debug!(command = %command.description(), "compiling command");
            statements.extend(self.grammar.compile(&blueprint, command)?);
        }

        info!(
            table = %blueprint.table(),
            statements = statements.len(),
            "applying schema change"
        );

        for (index, statement) in statements.iter().enumerate() {
            debug!(statement = %statement, "executing ddl");
            self.executor
                .execute(statement)
                .await
                .map_err(|source| BuilderError::Execution {
                    index,
                    statement: statement.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}
