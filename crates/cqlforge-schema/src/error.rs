//! Error types for blueprint finalization and DDL compilation.

/// Errors raised while finalizing a blueprint or compiling its commands.
///
/// All of these are detected before any statement could reach an execution
/// collaborator; a blueprint that fails here produces no DDL at all.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two live declarations exist for the same column name.
    #[error("column '{column}' is declared more than once on table '{table}'")]
    DuplicateColumn {
        /// Table the blueprint describes.
        table: String,
        /// The column name declared more than once.
        column: String,
    },

    /// The requested operation has no equivalent in the target dialect.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A command kind reached the grammar without a registered compiler.
    #[error("no compiler is registered for '{0}' commands")]
    UnsupportedCommand(&'static str),
}

/// Result type for schema compilation.
pub type Result<T> = std::result::Result<T, SchemaError>;
