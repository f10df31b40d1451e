//! End-to-end tests over the declare → finalize → compile pipeline:
//! full blueprints in, exact CQL statement lists out.

use cqlforge_schema::prelude::*;
use serde_json::json;

fn statements(declare: impl FnOnce(&mut Blueprint)) -> Vec<String> {
    let mut table = Blueprint::new("users");
    declare(&mut table);
    table
        .to_statements(&CqlGrammar::new())
        .expect("blueprint should compile")
}

#[test]
fn create_with_inline_primary_key() {
    let compiled = statements(|table| {
        table.create();
        table.uuid("id").primary();
        table.text("email");
    });

    assert_eq!(
        compiled,
        ["create table \"users\" (\"id\" uuid, \"email\" text, PRIMARY KEY (\"id\"))"]
    );
}

#[test]
fn create_without_primary_key_omits_key_clause() {
    let compiled = statements(|table| {
        table.create();
        table.text("line");
    });

    assert_eq!(compiled, ["create table \"users\" (\"line\" text)"]);
    assert!(!compiled[0].contains("PRIMARY KEY"));
}

#[test]
fn composite_key_renders_partition_group_then_clustering() {
    let compiled = statements(|table| {
        table.create();
        table.text("p1");
        table.text("p2");
        table.timestamp("c1");
        table.primary_with_partition(&["p1", "p2"], &["c1"]);
    });

    assert!(compiled[0].ends_with("PRIMARY KEY ((\"p1\",\"p2\"),\"c1\"))"));
}

#[test]
fn inline_index_expands_to_conventionally_named_index() {
    let compiled = statements(|table| {
        table.create();
        table.uuid("id").primary();
        table.text("email").index();
    });

    assert_eq!(
        compiled[1],
        "create index \"users_email_index\" ON \"users\" (\"email\")"
    );
}

#[test]
fn alter_prepends_added_columns_before_declared_commands() {
    let compiled = statements(|table| {
        table.index(&["email"]);
        table.text("email");
        table.integer("age");
    });

    assert_eq!(
        compiled,
        [
            "alter table \"users\" add \"email\" text, add \"age\" int",
            "create index \"users_email_index\" ON \"users\" (\"email\")",
        ]
    );
}

#[test]
fn duplicate_declarations_fail_to_finalize() {
    let mut table = Blueprint::new("users");
    table.text("email");
    table.text("email");

    let err = table.to_statements(&CqlGrammar::new()).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::DuplicateColumn { ref table, ref column }
            if table == "users" && column == "email"
    ));
}

#[test]
fn drop_index_and_create_index_compile_independently() {
    // Each command compiles to a fixed string given its own fields,
    // regardless of blueprint state outside those fields.
    let forward = statements(|table| {
        table.drop_index_named("users_email_index");
        table.index(&["email"]);
    });
    let reversed = statements(|table| {
        table.index(&["email"]);
        table.drop_index_named("users_email_index");
    });

    assert_eq!(forward.len(), 2);
    assert_eq!(forward[0], reversed[1]);
    assert_eq!(forward[1], reversed[0]);
}

#[test]
fn temporary_create_is_rejected_before_compilation() {
    let mut table = Blueprint::new("users");
    table.temporary();
    table.create();
    table.uuid("id");

    let err = table.to_statements(&CqlGrammar::new()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedOperation(_)));
}

#[test]
fn rename_has_no_cql_compiler() {
    let mut table = Blueprint::new("users");
    table.rename("accounts");

    let err = table.to_statements(&CqlGrammar::new()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedCommand("rename")));
}

#[test]
fn options_render_in_insertion_order() {
    let compiled = statements(|table| {
        table.create();
        table.uuid("id").primary();
        table
            .with_option("comment", json!("accounts by id"))
            .with_option("gc_grace_seconds", json!(864_000));
    });

    assert!(compiled[0].ends_with(
        " WITH comment=\"accounts by id\" AND gc_grace_seconds=864000"
    ));
}

#[test]
fn full_lifecycle_statement_shapes() {
    let create = statements(|table| {
        table.create();
        table.time_uuid("id").primary();
        table.text("email").index_named("by_email");
        table.timestamps();
    });
    assert_eq!(
        create,
        [
            "create table \"users\" (\"id\" timeuuid, \"email\" text, \
             \"created_at\" timestamp, \"updated_at\" timestamp, PRIMARY KEY (\"id\"))",
            "create index \"by_email\" ON \"users\" (\"email\")",
        ]
    );

    let widen = statements(|table| {
        table.boolean("verified");
    });
    assert_eq!(
        widen,
        ["alter table \"users\" add \"verified\" boolean"]
    );

    let shrink = statements(|table| {
        table.drop_timestamps();
    });
    assert_eq!(
        shrink,
        ["alter table \"users\" drop \"created_at\", drop \"updated_at\""]
    );

    let teardown = statements(|table| {
        table.drop_if_exists();
    });
    assert_eq!(teardown, ["drop table if exists \"users\""]);
}
