//! The CQL dialect.
//!
//! Renderings follow the Cassandra CQL reference: the primary key is
//! declared inside the `create table` column list, secondary indexes are
//! separate statements, table options hang off a `WITH` clause, and there
//! is no `change`/`rename` support at all.

use serde_json::Value;

use super::SchemaGrammar;
use crate::blueprint::Blueprint;
use crate::column::CqlType;
use crate::command::{KeyPart, SchemaCommand};
use crate::error::{Result, SchemaError};

/// CQL schema grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct CqlGrammar;

impl CqlGrammar {
    /// Creates a new CQL grammar.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn create_table_sql(&self, blueprint: &Blueprint) -> String {
        let mut definitions: Vec<String> = blueprint
            .columns()
            .iter()
            .map(|column| self.column_definition(column))
            .collect();

        // The key clause is absent, not empty, when no key was declared.
        if let Some(key) = self.primary_key_definition(blueprint.primary_columns()) {
            definitions.push(key);
        }

        let mut sql = format!(
            "create table {} ({})",
            self.wrap(blueprint.table()),
            definitions.join(", ")
        );
        if let Some(with) = Self::options_clause(blueprint.options()) {
            sql.push_str(&with);
        }
        sql
    }

    fn primary_key_definition(&self, parts: &[KeyPart]) -> Option<String> {
        if parts.is_empty() {
            return None;
        }
        let rendered: Vec<String> = parts
            .iter()
            .map(|part| match part {
                KeyPart::Column(name) => self.wrap(name),
                KeyPart::Group(names) => {
                    let quoted: Vec<String> =
                        names.iter().map(|name| self.wrap(name)).collect();
                    format!("({})", quoted.join(","))
                }
            })
            .collect();
        Some(format!("PRIMARY KEY ({})", rendered.join(",")))
    }

    fn options_clause(options: &[(String, Value)]) -> Option<String> {
        if options.is_empty() {
            return None;
        }
        let rendered: Vec<String> = options
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(format!(" WITH {}", rendered.join(" AND ")))
    }

    fn add_columns_sql(&self, blueprint: &Blueprint) -> String {
        let clauses: Vec<String> = blueprint
            .added_columns()
            .iter()
            .map(|column| format!("add {}", self.column_definition(column)))
            .collect();
        format!(
            "alter table {} {}",
            self.wrap(blueprint.table()),
            clauses.join(", ")
        )
    }

    fn index_sql(
        &self,
        blueprint: &Blueprint,
        name: &str,
        columns: &[String],
        algorithm: Option<&str>,
        options: Option<&Value>,
    ) -> String {
        let quoted: Vec<String> = columns.iter().map(|column| self.wrap(column)).collect();
        let mut sql = format!(
            "create index {} ON {} ({})",
            self.wrap(name),
            self.wrap(blueprint.table()),
            quoted.join(",")
        );
        if let Some(algorithm) = algorithm {
            sql.push_str(&format!(" using {algorithm}"));
        }
        if let Some(options) = options {
            sql.push_str(&format!(" WITH options = {options}"));
        }
        sql
    }

    fn drop_columns_sql(&self, blueprint: &Blueprint, columns: &[String]) -> String {
        let clauses: Vec<String> = columns
            .iter()
            .map(|column| format!("drop {}", self.wrap(column)))
            .collect();
        format!(
            "alter table {} {}",
            self.wrap(blueprint.table()),
            clauses.join(", ")
        )
    }

    fn drop_index_sql(&self, blueprint: &Blueprint, name: &str) -> String {
        format!(
            "drop index {}",
            self.wrap(&format!("{}_{}", blueprint.table(), name))
        )
    }
}

impl SchemaGrammar for CqlGrammar {
    fn name(&self) -> &'static str {
        "cql"
    }

    fn compile(&self, blueprint: &Blueprint, command: &SchemaCommand) -> Result<Vec<String>> {
        match command {
            SchemaCommand::Create => Ok(vec![self.create_table_sql(blueprint)]),

            SchemaCommand::Drop => Ok(vec![format!(
                "drop table {}",
                self.wrap(blueprint.table())
            )]),

            SchemaCommand::DropIfExists => Ok(vec![format!(
                "drop table if exists {}",
                self.wrap(blueprint.table())
            )]),

            SchemaCommand::Add => Ok(vec![self.add_columns_sql(blueprint)]),

            SchemaCommand::Index {
                name,
                columns,
                algorithm,
                options,
            } => Ok(vec![self.index_sql(
                blueprint,
                name,
                columns,
                algorithm.as_deref(),
                options.as_ref(),
            )]),

            SchemaCommand::DropIndex { name } => {
                Ok(vec![self.drop_index_sql(blueprint, name)])
            }

            SchemaCommand::DropColumn { columns } => {
                Ok(vec![self.drop_columns_sql(blueprint, columns)])
            }

            SchemaCommand::Change
            | SchemaCommand::Rename { .. }
            | SchemaCommand::RenameColumn { .. } => {
                Err(SchemaError::UnsupportedCommand(command.kind()))
            }
        }
    }

    fn type_name(&self, column_type: &CqlType) -> String {
        match column_type {
            CqlType::Text => "text".to_owned(),
            CqlType::Integer => "int".to_owned(),
            CqlType::BigInt => "bigint".to_owned(),
            CqlType::Float => "float".to_owned(),
            CqlType::Double => "double".to_owned(),
            CqlType::Boolean => "boolean".to_owned(),
            CqlType::Timestamp => "timestamp".to_owned(),
            CqlType::Blob => "blob".to_owned(),
            CqlType::Uuid => "uuid".to_owned(),
            CqlType::TimeUuid => "timeuuid".to_owned(),
            CqlType::Inet => "inet".to_owned(),
            CqlType::Custom(name) => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn grammar() -> CqlGrammar {
        CqlGrammar::new()
    }

    #[test]
    fn test_create_table_simple() {
        let mut table = Blueprint::new("users");
        table.create();
        table.uuid("id").primary();
        table.text("email");

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(
            statements,
            ["create table \"users\" (\"id\" uuid, \"email\" text, PRIMARY KEY (\"id\"))"]
        );
    }

    #[test]
    fn test_create_table_without_primary_key_has_no_key_clause() {
        let mut table = Blueprint::new("logs");
        table.create();
        table.text("line");

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(statements, ["create table \"logs\" (\"line\" text)"]);
    }

    #[test]
    fn test_create_table_with_partition_group() {
        let mut table = Blueprint::new("events");
        table.create();
        table.text("p1");
        table.text("p2");
        table.timestamp("c1");
        table.primary_with_partition(&["p1", "p2"], &["c1"]);

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(
            statements,
            ["create table \"events\" (\"p1\" text, \"p2\" text, \"c1\" timestamp, \
              PRIMARY KEY ((\"p1\",\"p2\"),\"c1\"))"]
        );
    }

    #[test]
    fn test_create_table_with_options() {
        let mut table = Blueprint::new("users");
        table.create();
        table.uuid("id").primary();
        table
            .with_option("default_time_to_live", json!(86400))
            .with_option("compaction", json!({"class": "LeveledCompactionStrategy"}));

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(
            statements,
            ["create table \"users\" (\"id\" uuid, PRIMARY KEY (\"id\")) \
              WITH default_time_to_live=86400 \
              AND compaction={\"class\":\"LeveledCompactionStrategy\"}"]
        );
    }

    #[test]
    fn test_add_columns_single_statement() {
        let mut table = Blueprint::new("users");
        table.integer("age");
        table.text("bio");

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(
            statements,
            ["alter table \"users\" add \"age\" int, add \"bio\" text"]
        );
    }

    #[test]
    fn test_index_statement() {
        let mut table = Blueprint::new("users");
        table.index(&["email"]);

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(
            statements,
            ["create index \"users_email_index\" ON \"users\" (\"email\")"]
        );
    }

    #[test]
    fn test_index_with_algorithm_and_options() {
        let mut table = Blueprint::new("users");
        table.index_with(
            &["email"],
            Some("email_sasi"),
            Some("SASIIndex"),
            Some(json!({"mode": "CONTAINS"})),
        );

        let statements = table.to_statements(&grammar()).unwrap();
        assert_eq!(
            statements,
            ["create index \"email_sasi\" ON \"users\" (\"email\") \
              using SASIIndex WITH options = {\"mode\":\"CONTAINS\"}"]
        );
    }

    #[test]
    fn test_drop_table() {
        let mut table = Blueprint::new("users");
        table.drop();
        assert_eq!(
            table.to_statements(&grammar()).unwrap(),
            ["drop table \"users\""]
        );

        let mut table = Blueprint::new("users");
        table.drop_if_exists();
        assert_eq!(
            table.to_statements(&grammar()).unwrap(),
            ["drop table if exists \"users\""]
        );
    }

    #[test]
    fn test_drop_columns() {
        let mut table = Blueprint::new("users");
        table.drop_column(&["age", "bio"]);

        assert_eq!(
            table.to_statements(&grammar()).unwrap(),
            ["alter table \"users\" drop \"age\", drop \"bio\""]
        );
    }

    #[test]
    fn test_drop_index_prefixes_table_name() {
        let mut table = Blueprint::new("users");
        table.drop_index_named("users_email_index");

        assert_eq!(
            table.to_statements(&grammar()).unwrap(),
            ["drop index \"users_users_email_index\""]
        );
    }

    #[test]
    fn test_unsupported_commands_are_diagnosed() {
        let g = grammar();
        let blueprint = Blueprint::new("users");

        let err = g.compile(&blueprint, &SchemaCommand::Change).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedCommand("change")));

        let err = g
            .compile(&blueprint, &SchemaCommand::Rename { to: "x".into() })
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedCommand("rename")));

        let err = g
            .compile(
                &blueprint,
                &SchemaCommand::RenameColumn {
                    from: "a".into(),
                    to: "b".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedCommand("rename_column")
        ));
    }

    #[test]
    fn test_type_names() {
        let g = grammar();
        assert_eq!(g.type_name(&CqlType::Integer), "int");
        assert_eq!(g.type_name(&CqlType::BigInt), "bigint");
        assert_eq!(g.type_name(&CqlType::TimeUuid), "timeuuid");
        assert_eq!(
            g.type_name(&CqlType::Custom("frozen<list<text>>".into())),
            "frozen<list<text>>"
        );
    }

    #[test]
    fn test_wrap_quoting() {
        let g = grammar();
        assert_eq!(g.wrap("*"), "*");
        assert_eq!(g.wrap("email"), "\"email\"");
        assert_eq!(g.wrap("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_custom_type_passes_through_in_definitions() {
        let mut table = Blueprint::new("users");
        table.create();
        table.custom("map<text, int>", "scores");

        assert_eq!(
            table.to_statements(&grammar()).unwrap(),
            ["create table \"users\" (\"scores\" map<text, int>)"]
        );
    }
}
