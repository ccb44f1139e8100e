use pretty_assertions::assert_eq;
use qail_duckdb::prelude::*;
use qail_duckdb::transpiler::scan::file_dataset;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn unquoted() -> DuckDbCompiler {
    DuckDbCompiler::new(DialectPolicy::duckdb().with_quoting(false))
}

#[test]
fn test_like_renders_plain_pattern() {
    let sql = like("name", "%John%").to_sql_with(&unquoted()).unwrap();
    assert_eq!(sql, "(name LIKE '%John%')");
}

#[test]
fn test_ilike_is_upper_emulated() {
    let sql = ilike("name", "%john%").to_sql_with(&unquoted()).unwrap();
    assert_eq!(sql, "(UPPER(name) LIKE UPPER('%john%'))");
}

#[test]
fn test_empty_insert_uses_default_values() {
    assert_eq!(
        Insert::table("users").to_sql().unwrap(),
        "INSERT INTO \"users\" DEFAULT VALUES"
    );
}

#[test]
fn test_string_and_blob_literals() {
    assert_eq!(
        Value::from("John's Name").to_sql().unwrap(),
        "'John''s Name'"
    );
    assert_eq!(
        Value::Blob(vec![0x00, 0x01, 0x02, 0x03]).to_sql().unwrap(),
        "'00010203'"
    );
}

#[test]
fn test_boolean_filter_uses_is() {
    let sql = Dataset::table("users")
        .filter(eq("active", false))
        .to_sql_with(&unquoted())
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE (active IS FALSE)");
}

#[test]
fn test_rendering_is_deterministic() {
    let query = Dataset::table("orders")
        .select([col("customer_id"), sum("total").alias("spent")])
        .filter(and([gte("total", 10), is_in("status", ["paid", "shipped"])]))
        .group_by([col("customer_id")])
        .order_desc("spent")
        .limit(5);
    let first = query.to_sql().unwrap();
    for _ in 0..10 {
        assert_eq!(query.to_sql().unwrap(), first);
    }
}

#[test]
fn test_file_scan_query() {
    let c = DuckDbCompiler::default();
    let sql = file_dataset(["logs/2024-01.parquet", "logs/2024-02.parquet"], &c)
        .unwrap()
        .filter(eq("level", "error"))
        .to_sql_with(&c)
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM read_parquet(['logs/2024-01.parquet', 'logs/2024-02.parquet']) \
         WHERE (\"level\" = 'error')"
    );
}

#[test]
fn test_config_policy_drives_rendering() {
    let config = DuckDbConfig::from_toml_str(
        "[duckdb.dialect]\nquote_identifiers = false\nilike = \"native\"\n",
    )
    .unwrap();
    let db = Database::mock_with(&config);
    let sql = db
        .sql(&Dataset::table("users").filter(ilike("name", "a%")))
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users WHERE (name ILIKE 'a%')");
}

#[test]
fn test_mock_database_round_trip() {
    init_tracing();
    let mut db = Database::mock();
    db.connection_mut().as_mock_mut().unwrap().push_result(
        ResultSet::new([("id", "BIGINT"), ("tags", "VARCHAR[]")]).row(vec![
            Cell::Int(1),
            Cell::List(vec![Cell::Text("a".into()), Cell::Null]),
        ]),
    );

    let rows = db
        .fetch(&Dataset::table("posts").select([col("id"), col("tags")]))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&Value::Int(1)));
    assert_eq!(
        rows[0].get("tags"),
        Some(&Value::List(vec![Value::String("a".into()), Value::Null]))
    );
}

#[test]
fn test_update_and_delete_share_where_text() {
    let filter = and([eq("tenant", 3), lt("age", 18)]);
    let ds = Dataset::table("people").filter(filter);
    let select = ds.to_sql_with(&unquoted()).unwrap();
    let update = ds
        .update([("flagged", Expr::from(true))])
        .unwrap()
        .to_sql_with(&unquoted())
        .unwrap();
    let delete = ds.delete().unwrap().to_sql_with(&unquoted()).unwrap();

    let where_text = " WHERE ((tenant = 3) AND (age < 18))";
    assert!(select.ends_with(where_text));
    assert!(update.ends_with(where_text));
    assert!(delete.ends_with(where_text));
}

#[test]
fn test_fetch_keeps_unsigned_values_past_i64() {
    let mut db = Database::mock();
    db.connection_mut().as_mock_mut().unwrap().push_result(
        ResultSet::new([("counter", "UBIGINT")])
            .row(vec![Cell::Int(7)])
            .row(vec![Cell::Int(u64::MAX as i128)]),
    );

    let rows = db.fetch(&Dataset::table("counters")).unwrap();
    assert_eq!(rows[0].get("counter"), Some(&Value::Int(7)));
    assert_eq!(
        rows[1].get("counter"),
        Some(&Value::Decimal(rust_decimal::Decimal::from(u64::MAX)))
    );
}
