//! Fluent CQL schema blueprints and the grammar that compiles them.
//!
//! `cqlforge-schema` turns a declarative description of desired table
//! structure into dialect-correct CQL DDL for Cassandra-compatible
//! wide-column stores, where the dialect differs sharply from relational
//! SQL: no foreign keys, composite partition/clustering keys instead of
//! auto-increment primary keys, indexes created as separate statements,
//! and table options expressed through a `WITH` clause.
//!
//! # Architecture
//!
//! - **Column/command model** — immutable-after-queueing value objects
//!   describing one column ([`column::ColumnSpec`]) or one structural
//!   change ([`command::SchemaCommand`]).
//! - **Blueprint** — a mutable accumulator populated by a fluent
//!   declaration pass, then finalized into an ordered command list with
//!   implied commands derived ([`blueprint::Blueprint`]).
//! - **Grammar** — a stateless translator with one compilation path per
//!   command kind ([`grammar::CqlGrammar`]).
//!
//! Compilation is pure: nothing in this crate executes a statement or
//! opens a connection. The companion `cqlforge-builder` crate drives the
//! pipeline against a live session.
//!
//! # Example
//!
//! ```rust
//! use cqlforge_schema::prelude::*;
//!
//! let mut table = Blueprint::new("users");
//! table.create();
//! table.uuid("id").primary();
//! table.text("email").index();
//!
//! let statements = table.to_statements(&CqlGrammar::new()).unwrap();
//! assert_eq!(
//!     statements,
//!     [
//!         "create table \"users\" (\"id\" uuid, \"email\" text, PRIMARY KEY (\"id\"))",
//!         "create index \"users_email_index\" ON \"users\" (\"email\")",
//!     ]
//! );
//! ```

pub mod blueprint;
pub mod column;
pub mod command;
pub mod error;
pub mod grammar;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::blueprint::Blueprint;
    pub use crate::column::{ColumnSpec, CqlType, InlineIndex};
    pub use crate::command::{KeyPart, SchemaCommand};
    pub use crate::error::{Result, SchemaError};
    pub use crate::grammar::{CqlGrammar, SchemaGrammar};
}
