//! Schema commands: the discrete structural changes a blueprint queues for
//! compilation.
//!
//! Commands are immutable once queued and their order is semantically
//! significant; an `Add` must not precede the `Create` for the same table,
//! which is why the blueprint, not the caller, owns final ordering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of a primary key declaration.
///
/// The first `Group` determines data placement (the partition key);
/// subsequent columns order rows within the partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPart {
    /// A single key column.
    Column(String),
    /// A parenthesized partition-key group.
    Group(Vec<String>),
}

impl KeyPart {
    /// Creates a single-column key part.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Creates a partition-key group.
    #[must_use]
    pub fn group<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Group(names.into_iter().map(Into::into).collect())
    }
}

/// A single requested structural change.
///
/// Each variant carries only the fields its compilation needs; columns for
/// `Add` and `Change` are read off the owning blueprint at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaCommand {
    /// Create the table described by the blueprint.
    Create,
    /// Drop the table.
    Drop,
    /// Drop the table if it exists.
    DropIfExists,
    /// Add the blueprint's newly declared columns to an existing table.
    Add,
    /// Modify the blueprint's changed columns (no CQL compiler exists).
    Change,
    /// Rename the table (no CQL compiler exists).
    Rename {
        /// The new table name.
        to: String,
    },
    /// Create a secondary index.
    Index {
        /// Index name, conventional or explicit.
        name: String,
        /// Columns covered by the index.
        columns: Vec<String>,
        /// Optional index algorithm (`using …`).
        algorithm: Option<String>,
        /// Optional index options, serialized as JSON.
        options: Option<Value>,
    },
    /// Drop a secondary index.
    DropIndex {
        /// Index name, conventional or explicit.
        name: String,
    },
    /// Drop the named columns.
    DropColumn {
        /// Names of the columns to drop.
        columns: Vec<String>,
    },
    /// Rename a column (no CQL compiler exists).
    RenameColumn {
        /// Current column name.
        from: String,
        /// New column name.
        to: String,
    },
}

impl SchemaCommand {
    /// Returns the command kind as a stable tag, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Drop => "drop",
            Self::DropIfExists => "drop_if_exists",
            Self::Add => "add",
            Self::Change => "change",
            Self::Rename { .. } => "rename",
            Self::Index { .. } => "index",
            Self::DropIndex { .. } => "drop_index",
            Self::DropColumn { .. } => "drop_column",
            Self::RenameColumn { .. } => "rename_column",
        }
    }

    /// Returns a human-readable description of this command.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Create => "create table".to_string(),
            Self::Drop => "drop table".to_string(),
            Self::DropIfExists => "drop table if exists".to_string(),
            Self::Add => "add declared columns".to_string(),
            Self::Change => "change declared columns".to_string(),
            Self::Rename { to } => format!("rename table to '{to}'"),
            Self::Index { name, columns, .. } => {
                format!("create index '{}' on ({})", name, columns.join(", "))
            }
            Self::DropIndex { name } => format!("drop index '{name}'"),
            Self::DropColumn { columns } => {
                format!("drop columns ({})", columns.join(", "))
            }
            Self::RenameColumn { from, to } => {
                format!("rename column '{from}' to '{to}'")
            }
        }
    }
}
