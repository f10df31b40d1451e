//! Column model: CQL data types and per-column declarations.

use serde::{Deserialize, Serialize};

/// CQL data types supported by the schema compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CqlType {
    /// UTF-8 text.
    Text,
    /// Integer (32-bit).
    Integer,
    /// Big integer (64-bit).
    BigInt,
    /// Floating point (single precision).
    Float,
    /// Floating point (double precision).
    Double,
    /// Boolean.
    Boolean,
    /// Millisecond-precision timestamp.
    Timestamp,
    /// Arbitrary bytes.
    Blob,
    /// Type 4 UUID.
    Uuid,
    /// Type 1 (time-based) UUID.
    TimeUuid,
    /// IPv4 or IPv6 address.
    Inet,
    /// A dialect-native type name supplied directly by the caller.
    ///
    /// Passes through the grammar's type mapping unchanged, so new store
    /// types can be used without waiting for a variant here.
    Custom(String),
}

/// Column-level shorthand for a key or index declaration.
///
/// Carried on a [`ColumnSpec`] and consumed at finalize time, where it is
/// expanded exactly as if the equivalent blueprint-level declaration had
/// been made for that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineIndex {
    /// Derive the conventional name from the table and column.
    Auto,
    /// Use the given explicit name.
    Named(String),
}

/// One declared column on a blueprint.
///
/// Specs stay mutable until the blueprint is finalized, so modifiers can be
/// chained onto the reference returned by
/// [`Blueprint::column`](crate::blueprint::Blueprint::column):
///
/// ```rust
/// use cqlforge_schema::blueprint::Blueprint;
///
/// let mut table = Blueprint::new("users");
/// table.uuid("id").primary();
/// table.text("email").not_null().index();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name, unique among live columns at finalize time.
    pub name: String,
    /// Declared data type.
    pub column_type: CqlType,
    /// Whether the column allows null values.
    pub nullable: bool,
    /// Marks this spec as modifying an existing column rather than adding
    /// one.
    pub change: bool,
    /// Shorthand primary-key flag, consumed at finalize.
    pub primary: Option<InlineIndex>,
    /// Shorthand index flag, consumed at finalize.
    pub index: Option<InlineIndex>,
}

impl ColumnSpec {
    /// Creates a new column spec. Columns are nullable by default.
    #[must_use]
    pub fn new(column_type: CqlType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
            change: false,
            primary: None,
            index: None,
        }
    }

    /// Disallows null values.
    pub fn not_null(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    /// Allows null values (the default).
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Marks this spec as a modification of an existing column.
    pub fn change(&mut self) -> &mut Self {
        self.change = true;
        self
    }

    /// Marks this column as the table's primary key.
    pub fn primary(&mut self) -> &mut Self {
        self.primary = Some(InlineIndex::Auto);
        self
    }

    /// Requests an auto-named secondary index on this column.
    pub fn index(&mut self) -> &mut Self {
        self.index = Some(InlineIndex::Auto);
        self
    }

    /// Requests a secondary index on this column with an explicit name.
    pub fn index_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.index = Some(InlineIndex::Named(name.into()));
        self
    }
}
