//! CTEs, window functions, set operations, DDL and transactions.

use pretty_assertions::assert_eq;

use super::bare;
use crate::ast::builders::*;
use crate::ast::{
    ColumnDef, CreateSchema, CreateSequence, CreateTable, Dataset, DropSchema, DropTable,
    FrameBound, IsolationLevel, OrderTerm, Statement, Transaction, WindowFrame, WindowSpec,
};
use crate::error::SqlError;
use crate::transpiler::dialect::{BooleanLiterals, DialectPolicy};
use crate::transpiler::{DuckDbCompiler, ToSql};

#[test]
fn test_cte() {
    let ds = Dataset::table("recent")
        .with("recent", Dataset::table("orders").filter(gt("id", 100)));
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "WITH recent AS (SELECT * FROM orders WHERE (id > 100)) SELECT * FROM recent"
    );
}

#[test]
fn test_recursive_marks_whole_clause() {
    let base = Dataset::new().select([lit(1)]);
    let step = Dataset::table("t")
        .select([col("n").plus(1)])
        .filter(lt("n", 10));
    let ds = Dataset::table("t")
        .with("plain", Dataset::table("x"))
        .with_recursive("t", ["n"], base, step, true);
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "WITH RECURSIVE plain AS (SELECT * FROM x), \
         t(n) AS (SELECT 1 UNION ALL SELECT (n + 1) FROM t WHERE (n < 10)) SELECT * FROM t"
    );
}

#[test]
fn test_cte_columns_quoted() {
    let ds = Dataset::table("c")
        .with("c", Dataset::new().select([lit(1)]))
        .cte_columns(["one"]);
    assert_eq!(
        ds.to_sql().unwrap(),
        "WITH \"c\"(\"one\") AS (SELECT 1) SELECT * FROM \"c\""
    );
}

#[test]
fn test_window_functions() {
    let spec = WindowSpec {
        partition: vec![col("dept")],
        order: vec![OrderTerm::desc(col("salary"))],
        frame: None,
    };
    let ds = Dataset::table("emp").select([col("name"), rank().over(spec).alias("r")]);
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT name, rank() OVER (PARTITION BY dept ORDER BY salary DESC) AS r FROM emp"
    );
}

#[test]
fn test_window_without_partition() {
    let spec = WindowSpec {
        order: vec![OrderTerm::asc(col("ts")).nulls_last()],
        frame: Some(WindowFrame::Rows {
            start: FrameBound::Preceding(2),
            end: FrameBound::CurrentRow,
        }),
        ..Default::default()
    };
    let e = sum("v").over(spec);
    assert_eq!(
        e.to_sql_with(&bare()).unwrap(),
        "sum(v) OVER (ORDER BY ts ASC NULLS LAST ROWS BETWEEN 2 PRECEDING AND CURRENT ROW)"
    );
}

#[test]
fn test_qualify_and_distinct_on() {
    let ds = Dataset::table("events")
        .distinct_on([col("user_id")])
        .qualify(cmp(
            row_number().over(WindowSpec {
                partition: vec![col("user_id")],
                ..Default::default()
            }),
            crate::ast::CompareOp::Eq,
            1,
        ));
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT DISTINCT ON (user_id) * FROM events \
         QUALIFY (row_number() OVER (PARTITION BY user_id) = 1)"
    );
}

#[test]
fn test_distinct() {
    let ds = Dataset::table("t").columns(["a"]).distinct();
    assert_eq!(ds.to_sql_with(&bare()).unwrap(), "SELECT DISTINCT a FROM t");
}

#[test]
fn test_set_operations() {
    let c = bare();
    let a = Dataset::table("a").columns(["id"]);
    let b = Dataset::table("b").columns(["id"]);
    assert_eq!(
        a.clone().union(b.clone()).to_sql_with(&c).unwrap(),
        "SELECT id FROM a UNION SELECT id FROM b"
    );
    assert_eq!(
        a.clone().union_all(b.clone()).to_sql_with(&c).unwrap(),
        "SELECT id FROM a UNION ALL SELECT id FROM b"
    );
    assert_eq!(
        a.clone().intersect(b.clone()).to_sql_with(&c).unwrap(),
        "SELECT id FROM a INTERSECT SELECT id FROM b"
    );
    assert_eq!(
        a.except(b).to_sql_with(&c).unwrap(),
        "SELECT id FROM a EXCEPT SELECT id FROM b"
    );
}

fn ids(table: &str) -> Dataset {
    Dataset::table(table).columns(["id"])
}

#[test]
fn test_ordered_left_operand_is_wrapped() {
    let ds = ids("a").order_asc("id").limit(5).union(ids("b"));
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT * FROM (SELECT id FROM a ORDER BY id ASC LIMIT 5) AS t1 UNION SELECT id FROM b"
    );
}

#[test]
fn test_nested_right_operand_keeps_grouping() {
    let ds = ids("a").except(ids("b").union(ids("c")));
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT id FROM a EXCEPT SELECT * FROM (SELECT id FROM b UNION SELECT id FROM c) AS t1"
    );
}

#[test]
fn test_chained_set_operations_bind_left_to_right() {
    let ds = ids("a").union(ids("b")).intersect(ids("c"));
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT * FROM (SELECT id FROM a UNION SELECT id FROM b) AS t1 INTERSECT SELECT id FROM c"
    );
}

#[test]
fn test_right_operand_with_cte_is_wrapped() {
    let ds = ids("a").union(ids("b").with("b", Dataset::table("src")));
    assert_eq!(
        ds.to_sql().unwrap(),
        "SELECT \"id\" FROM \"a\" UNION SELECT * FROM \
         (WITH \"b\" AS (SELECT * FROM \"src\") SELECT \"id\" FROM \"b\") AS \"t1\""
    );
}

#[test]
fn test_right_operand_with_limit_is_wrapped() {
    let ds = ids("a").union_all(ids("b").limit(2));
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT id FROM a UNION ALL SELECT * FROM (SELECT id FROM b LIMIT 2) AS t1"
    );
}

#[test]
fn test_order_and_limit_apply_to_whole_compound() {
    let ds = ids("a").union(ids("b")).order_desc("id").limit(3).offset(1);
    assert_eq!(
        ds.to_sql_with(&bare()).unwrap(),
        "SELECT id FROM a UNION SELECT id FROM b ORDER BY id DESC LIMIT 3 OFFSET 1"
    );
}

#[test]
fn test_lock_with_set_operation_rejected() {
    let c = DuckDbCompiler::new(DialectPolicy {
        supports_row_locks: true,
        ..DialectPolicy::duckdb()
    });
    let err = ids("a").union(ids("b")).for_update().to_sql_with(&c).unwrap_err();
    assert!(matches!(err, SqlError::InvalidOptions(_)));
}

#[test]
fn test_for_update_unsupported() {
    let err = Dataset::table("t").for_update().to_sql().unwrap_err();
    assert!(matches!(err, SqlError::Unsupported { dialect: "DuckDB", .. }));
}

#[test]
fn test_create_schema() {
    let stmt = Statement::CreateSchema(CreateSchema {
        name: "analytics".into(),
        if_not_exists: true,
        or_replace: false,
    });
    assert_eq!(
        stmt.to_sql().unwrap(),
        "CREATE SCHEMA IF NOT EXISTS \"analytics\""
    );
}

#[test]
fn test_create_schema_conflicting_options() {
    let stmt = Statement::CreateSchema(CreateSchema {
        name: "analytics".into(),
        if_not_exists: true,
        or_replace: true,
    });
    assert!(matches!(stmt.to_sql(), Err(SqlError::InvalidOptions(_))));
}

#[test]
fn test_drop_schema_and_table() {
    let stmt = Statement::DropSchema(DropSchema {
        name: "s".into(),
        if_exists: true,
        cascade: true,
    });
    assert_eq!(stmt.to_sql().unwrap(), "DROP SCHEMA IF EXISTS \"s\" CASCADE");
    let stmt = Statement::DropTable(DropTable {
        table: "t".into(),
        if_exists: false,
        cascade: false,
    });
    assert_eq!(stmt.to_sql().unwrap(), "DROP TABLE \"t\"");
}

#[test]
fn test_create_table() {
    let stmt: Statement = CreateTable::new("users")
        .if_not_exists()
        .column(ColumnDef::new("id", "INTEGER").primary_key())
        .column(ColumnDef::new("name", "VARCHAR").not_null())
        .column(ColumnDef::new("active", "BOOLEAN").default_value(true))
        .into();
    assert_eq!(
        stmt.to_sql().unwrap(),
        "CREATE TABLE IF NOT EXISTS \"users\" (\"id\" INTEGER PRIMARY KEY, \
         \"name\" VARCHAR NOT NULL, \"active\" BOOLEAN DEFAULT TRUE)"
    );
}

#[test]
fn test_create_table_composite_key() {
    let stmt: Statement = CreateTable::new("m")
        .column(ColumnDef::new("a", "INTEGER").primary_key())
        .column(ColumnDef::new("b", "INTEGER").primary_key())
        .into();
    assert_eq!(
        stmt.to_sql_with(&bare()).unwrap(),
        "CREATE TABLE m (a INTEGER, b INTEGER, PRIMARY KEY (a, b))"
    );
}

#[test]
fn test_create_table_as_select() {
    let stmt: Statement = CreateTable::new("snap")
        .or_replace()
        .as_select(Dataset::table("users"))
        .into();
    assert_eq!(
        stmt.to_sql_with(&bare()).unwrap(),
        "CREATE OR REPLACE TABLE snap AS SELECT * FROM users"
    );

    let bad: Statement = CreateTable::new("snap")
        .or_replace()
        .if_not_exists()
        .as_select(Dataset::table("users"))
        .into();
    assert!(matches!(bad.to_sql(), Err(SqlError::InvalidOptions(_))));
}

#[test]
fn test_create_sequence() {
    let stmt = Statement::CreateSequence(CreateSequence {
        name: "users_id_seq".into(),
        start: Some(1),
        increment: None,
        if_not_exists: true,
    });
    assert_eq!(
        stmt.to_sql().unwrap(),
        "CREATE SEQUENCE IF NOT EXISTS \"users_id_seq\" START WITH 1"
    );
}

#[test]
fn test_transactions() {
    let sql = |t: Transaction| Statement::Transaction(t).to_sql();
    assert_eq!(sql(Transaction::Begin { isolation: None }).unwrap(), "BEGIN TRANSACTION");
    assert_eq!(sql(Transaction::Commit).unwrap(), "COMMIT");
    assert_eq!(sql(Transaction::Rollback).unwrap(), "ROLLBACK");

    let err = sql(Transaction::Savepoint("sp1".into())).unwrap_err();
    assert_eq!(err.to_string(), "savepoints is not supported by DuckDB");
    let err = sql(Transaction::Begin {
        isolation: Some(IsolationLevel::Serializable),
    })
    .unwrap_err();
    assert!(matches!(err, SqlError::Unsupported { .. }));
}

#[test]
fn test_numeric_boolean_policy() {
    let mut policy = DialectPolicy::duckdb().with_quoting(false);
    policy.boolean_literals = BooleanLiterals::Numeric;
    let c = DuckDbCompiler::new(policy);
    assert_eq!(lit(true).to_sql_with(&c).unwrap(), "1");
    // IS tests keep keywords
    assert_eq!(eq("flag", true).to_sql_with(&c).unwrap(), "(flag IS TRUE)");
}

#[test]
fn test_window_capability_disabled() {
    let mut policy = DialectPolicy::duckdb();
    policy.supports_window_functions = false;
    let c = DuckDbCompiler::new(policy);
    let e = rank().over(WindowSpec::default());
    assert!(matches!(e.to_sql_with(&c), Err(SqlError::Unsupported { .. })));
}
