//! Example: Declaring a small keyspace worth of tables
//!
//! Demonstrates the full pipeline — fluent declaration, implied-command
//! inference, CQL compilation, and sequential submission — against an
//! in-memory executor that records what a real session would run.
//!
//! Run with: cargo run --example users_keyspace -p cqlforge-builder

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use cqlforge_builder::prelude::*;

/// Stands in for a cluster session: records every statement and tracks the
/// tables that "exist" so `has_table` has something to probe.
#[derive(Default)]
struct InMemorySession {
    tables: Mutex<Vec<String>>,
    log: Mutex<Vec<String>>,
}

#[async_trait]
impl SchemaExecutor for InMemorySession {
    async fn table_names(&self) -> std::result::Result<Vec<String>, ExecutorError> {
        Ok(self.tables.lock().unwrap().clone())
    }

    async fn execute(&self, statement: &str) -> std::result::Result<(), ExecutorError> {
        if let Some(rest) = statement.strip_prefix("create table \"") {
            if let Some(table) = rest.split('"').next() {
                self.tables.lock().unwrap().push(table.to_owned());
            }
        }
        self.log.lock().unwrap().push(statement.to_owned());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let schema = SchemaBuilder::new(InMemorySession::default(), CqlGrammar::new());

    println!("[1] Creating the users table...");
    schema
        .create("users", |table| {
            table.uuid("id").primary();
            table.text("email").index();
            table.text("display_name");
            table.boolean("verified");
            table.timestamps();
            table.with_option("comment", json!("account records"));
        })
        .await?;

    println!("[2] Creating the events table with a composite key...");
    schema
        .create("events", |table| {
            table.text("tenant");
            table.text("day");
            table.time_uuid("at");
            table.text("payload");
            table.primary_with_partition(&["tenant", "day"], &["at"]);
            table.with_option("default_time_to_live", json!(2_592_000));
        })
        .await?;

    println!("[3] Probing table existence...");
    println!("    users exists:  {}", schema.has_table("users").await?);
    println!("    orders exists: {}", schema.has_table("orders").await?);

    println!("[4] Altering the users table...");
    schema
        .table("users", |table| {
            table.ip_address("last_login_ip");
            table.index(&["verified"]);
        })
        .await?;

    println!("[5] Compiling without executing (pure compilation)...");
    let mut scratch = Blueprint::new("sessions");
    scratch.create();
    scratch.uuid("token").primary();
    scratch.timestamp("expires_at");
    for statement in scratch.to_statements(&CqlGrammar::new())? {
        println!("    {statement};");
    }

    println!("[6] Everything the session was asked to run:");
    for statement in schema.executor().log.lock().unwrap().iter() {
        println!("    {statement};");
    }

    Ok(())
}
