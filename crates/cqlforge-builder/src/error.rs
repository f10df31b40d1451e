//! Error types for builder orchestration.

use cqlforge_schema::error::SchemaError;

use crate::executor::ExecutorError;

/// Errors that can occur while applying a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// The blueprint failed to finalize or compile.
    ///
    /// Detected before anything reaches the execution collaborator; no
    /// statement was submitted.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The collaborator failed to list existing tables.
    #[error("failed to list tables: {0}")]
    TableListing(#[source] ExecutorError),

    /// A statement failed during sequential submission.
    ///
    /// `index` is zero-based, so it also counts the statements that had
    /// already succeeded. Earlier statements are not rolled back; DDL in
    /// this class of store is not transactional.
    #[error("statement {index} ('{statement}') failed: {source}")]
    Execution {
        /// Position of the failing statement in the compiled list.
        index: usize,
        /// The statement text that failed.
        statement: String,
        /// The collaborator's reported failure.
        #[source]
        source: ExecutorError,
    },
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, BuilderError>;
