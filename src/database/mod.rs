//! Execution boundary: runs compiled SQL against a DuckDB connection.
//!
//! `Database` owns one `Connection` and one compiler. Statements are rendered
//! first and executed second, so a descriptor the dialect rejects never
//! reaches the engine.

pub mod connection;
pub mod mock;
#[cfg(feature = "duckdb")]
pub mod native;
pub mod schema;

use crate::ast::{Dataset, Insert, Transaction, Value};
use crate::config::DuckDbConfig;
use crate::error::{SqlError, SqlResult};
use crate::transpiler::{DialectCompiler, DuckDbCompiler, ToSql};
use crate::transpiler::dml::insert::build_insert;
use crate::transpiler::literals::quote_string;
use crate::types::{Cell, SchemaType, parse_type, typecast};

pub use connection::{Connection, ResultSet};
pub use mock::MockConnection;
#[cfg(feature = "duckdb")]
pub use native::NativeConnection;
pub use schema::{ColumnInfo, Row};

pub struct Database {
    connection: Connection,
    compiler: DuckDbCompiler,
}

impl Database {
    pub fn new(connection: impl Into<Connection>, compiler: DuckDbCompiler) -> Self {
        Self {
            connection: connection.into(),
            compiler,
        }
    }

    /// A database backed by a fresh `MockConnection`.
    pub fn mock() -> Self {
        Self::new(MockConnection::new(), DuckDbCompiler::default())
    }

    /// Open the database file named by the config (in-memory when unset).
    #[cfg(feature = "duckdb")]
    pub fn open(config: &DuckDbConfig) -> SqlResult<Self> {
        tracing::info!(
            "Opening DuckDB database: {}",
            config.path.as_deref().unwrap_or(":memory:")
        );
        let conn = NativeConnection::open(config.path.as_deref())?;
        Ok(Self::new(conn, DuckDbCompiler::new(config.dialect.clone())))
    }

    /// A mock-backed database using the config's dialect policy.
    pub fn mock_with(config: &DuckDbConfig) -> Self {
        Self::new(
            MockConnection::new(),
            DuckDbCompiler::new(config.dialect.clone()),
        )
    }

    pub fn compiler(&self) -> &DuckDbCompiler {
        &self.compiler
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }

    /// Render `stmt` without running it.
    pub fn sql(&self, stmt: &dyn ToSql) -> SqlResult<String> {
        stmt.to_sql_with(&self.compiler).inspect_err(|e| {
            if let SqlError::Unsupported { feature, .. } = e {
                tracing::warn!("{} requested through {}", feature, self.compiler.name());
            }
        })
    }

    /// Run a raw SQL statement.
    pub fn run(&mut self, sql: &str) -> SqlResult<usize> {
        tracing::debug!("execute: {}", sql);
        self.connection.execute(sql)
    }

    /// Compile and run a statement that returns no rows.
    pub fn execute(&mut self, stmt: &dyn ToSql) -> SqlResult<usize> {
        let sql = self.sql(stmt)?;
        self.run(&sql)
    }

    /// Run a query and typecast every cell with its column's type.
    pub fn query(&mut self, sql: &str) -> SqlResult<Vec<Row>> {
        tracing::debug!("query: {}", sql);
        let result = self.connection.query(sql)?;
        typed_rows(result)
    }

    /// Compile and run a dataset.
    pub fn fetch(&mut self, ds: &Dataset) -> SqlResult<Vec<Row>> {
        let sql = self.sql(ds)?;
        self.query(&sql)
    }

    /// First row of a dataset, if any.
    ///
    /// The LIMIT applies to the whole result, set operations included.
    pub fn first(&mut self, ds: &Dataset) -> SqlResult<Option<Row>> {
        let limited = ds.clone().limit(1);
        Ok(self.fetch(&limited)?.into_iter().next())
    }

    /// Run an insert and read back the generated key.
    ///
    /// Returns `None` when the insert names neither a primary key nor a
    /// sequence.
    pub fn insert(&mut self, ins: &Insert) -> SqlResult<Option<Value>> {
        let plan = build_insert(ins, &self.compiler)?;
        for statement in &plan.statements {
            self.run(statement)?;
        }
        let Some(lookup) = plan.last_insert_id else {
            return Ok(None);
        };
        let row = self.query(&lookup)?.into_iter().next();
        Ok(row.and_then(|r| r.values().first().cloned()))
    }

    /// Run `f` inside BEGIN/COMMIT, rolling back when it fails.
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut Database) -> SqlResult<T>,
    ) -> SqlResult<T> {
        self.execute(&Transaction::Begin { isolation: None })?;
        match f(self) {
            Ok(value) => {
                self.execute(&Transaction::Commit)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = self.execute(&Transaction::Rollback) {
                    tracing::warn!("rollback failed: {}", rollback);
                }
                Err(err)
            }
        }
    }

    /// Base tables in the main schema, sorted by name.
    pub fn tables(&mut self) -> SqlResult<Vec<String>> {
        let rows = self.query(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )?;
        Ok(rows
            .iter()
            .filter_map(|r| r.values().first().and_then(Value::as_str).map(str::to_string))
            .collect())
    }

    /// Column metadata for `table`, in declaration order.
    pub fn schema(&mut self, table: &str) -> SqlResult<Vec<ColumnInfo>> {
        let sql = format!(
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info({}) ORDER BY cid",
            quote_string(table)
        );
        let rows = self.query(&sql)?;
        rows.iter().map(column_info).collect()
    }

    pub fn table_exists(&mut self, table: &str) -> SqlResult<bool> {
        Ok(self.tables()?.iter().any(|t| t == table))
    }
}

fn column_info(row: &Row) -> SqlResult<ColumnInfo> {
    let text = |col: &str| row.get(col).and_then(Value::as_str).map(str::to_string);
    let flag = |col: &str| matches!(row.get(col), Some(Value::Bool(true)));

    let db_type = text("type").ok_or_else(|| SqlError::Database("pragma_table_info returned no type".into()))?;
    Ok(ColumnInfo {
        name: text("name").unwrap_or_default(),
        schema_type: parse_type(&db_type)?,
        db_type,
        allow_null: !flag("notnull"),
        default: text("dflt_value"),
        primary_key: flag("pk"),
    })
}

fn typed_rows(result: ResultSet) -> SqlResult<Vec<Row>> {
    let types = result
        .types
        .iter()
        .map(|t| parse_type(t))
        .collect::<SqlResult<Vec<_>>>()?;
    let fallback = SchemaType::String { length: None };

    result
        .rows
        .into_iter()
        .map(|cells| {
            let values = cells
                .into_iter()
                .enumerate()
                .map(|(i, cell): (usize, Cell)| typecast(cell, types.get(i).unwrap_or(&fallback)))
                .collect::<SqlResult<Vec<_>>>()?;
            Ok(Row::new(result.columns.clone(), values))
        })
        .collect()
}
