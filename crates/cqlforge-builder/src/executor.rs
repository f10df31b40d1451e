//! The execution collaborator seam.
//!
//! The builder never opens connections or issues network calls itself; it
//! consumes exactly two capabilities from whatever session layer the
//! application provides.

use async_trait::async_trait;

/// Error reported by the execution collaborator.
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync>;

/// The capabilities the schema builder needs from a live cluster session.
///
/// Implementations wrap a driver session. Retry policy belongs here, not
/// in the builder: DDL is not safely retried blindly, and the builder has
/// no visibility into network timing.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    /// Lists the tables that currently exist.
    async fn table_names(&self) -> Result<Vec<String>, ExecutorError>;

    /// Runs a single DDL statement.
    async fn execute(&self, statement: &str) -> Result<(), ExecutorError>;
}
