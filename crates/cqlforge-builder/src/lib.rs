//! Schema-change orchestration for CQL blueprints.
//!
//! `cqlforge-builder` sits between the pure compilation core
//! (`cqlforge-schema`) and a live cluster session. It answers "does this
//! table exist?" and drives the declare → finalize → compile → submit
//! pipeline for one table mutation at a time.
//!
//! The session itself stays abstract: implement [`executor::SchemaExecutor`]
//! over your driver of choice and the builder will hand it compiled CQL
//! statements, strictly one at a time. Compilation errors abort before
//! anything is submitted; an execution failure stops the remaining
//! statements and reports exactly how far submission got.
//!
//! # Example
//!
//! ```rust,no_run
//! use cqlforge_builder::prelude::*;
//!
//! # async fn demo(session: impl SchemaExecutor) -> Result<()> {
//! let schema = SchemaBuilder::new(session, CqlGrammar::new());
//!
//! if !schema.has_table("users").await? {
//!     schema
//!         .create("users", |table| {
//!             table.uuid("id").primary();
//!             table.text("email").index();
//!             table.timestamps();
//!         })
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod executor;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::builder::{BlueprintResolver, SchemaBuilder};
    pub use crate::error::{BuilderError, Result};
    pub use crate::executor::{ExecutorError, SchemaExecutor};

    pub use cqlforge_schema::blueprint::Blueprint;
    pub use cqlforge_schema::column::{ColumnSpec, CqlType, InlineIndex};
    pub use cqlforge_schema::command::{KeyPart, SchemaCommand};
    pub use cqlforge_schema::error::SchemaError;
    pub use cqlforge_schema::grammar::{CqlGrammar, SchemaGrammar};
}
