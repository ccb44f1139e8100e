//! Native DuckDB connection through the `duckdb` crate.

use duckdb::types::{TimeUnit, Value as DuckValue};

use crate::error::{SqlError, SqlResult};
use crate::types::Cell;

use super::connection::ResultSet;

fn engine_error(err: duckdb::Error) -> SqlError {
    SqlError::Database(err.to_string())
}

pub struct NativeConnection {
    conn: duckdb::Connection,
    path: Option<String>,
}

impl std::fmt::Debug for NativeConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeConnection")
            .field("path", &self.path)
            .finish()
    }
}

impl NativeConnection {
    /// Open a database file. `None` or `":memory:"` opens an in-memory database.
    pub fn open(path: Option<&str>) -> SqlResult<Self> {
        let conn = match path {
            None | Some(":memory:") => duckdb::Connection::open_in_memory(),
            Some(p) => duckdb::Connection::open(p),
        }
        .map_err(engine_error)?;
        Ok(Self {
            conn,
            path: path.map(str::to_string),
        })
    }

    pub(crate) fn execute(&mut self, sql: &str) -> SqlResult<usize> {
        self.conn.execute(sql, []).map_err(engine_error)
    }

    pub(crate) fn query(&mut self, sql: &str) -> SqlResult<ResultSet> {
        let mut stmt = self.conn.prepare(sql).map_err(engine_error)?;

        // column_count/column_name are only valid once the statement has run
        let rows = stmt
            .query_map([], |row| {
                let count = row.as_ref().column_count();
                (0..count)
                    .map(|i| row.get::<_, DuckValue>(i).map(to_cell))
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(engine_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(engine_error)?;

        let columns: Vec<String> = (0..stmt.column_count())
            .map(|i| {
                stmt.column_name(i)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| format!("col_{}", i))
            })
            .collect();
        let types = (0..columns.len())
            .map(|i| {
                rows.iter()
                    .filter_map(|r| r.get(i))
                    .find(|c| !matches!(c, Cell::Null))
                    .map_or("VARCHAR", type_hint)
                    .to_string()
            })
            .collect();

        Ok(ResultSet {
            columns,
            types,
            rows,
        })
    }
}

fn micros(unit: TimeUnit, v: i64) -> i64 {
    match unit {
        TimeUnit::Second => v * 1_000_000,
        TimeUnit::Millisecond => v * 1_000,
        TimeUnit::Microsecond => v,
        TimeUnit::Nanosecond => v / 1_000,
    }
}

fn to_cell(value: DuckValue) -> Cell {
    match value {
        DuckValue::Null => Cell::Null,
        DuckValue::Boolean(b) => Cell::Bool(b),
        DuckValue::TinyInt(n) => Cell::Int(n.into()),
        DuckValue::SmallInt(n) => Cell::Int(n.into()),
        DuckValue::Int(n) => Cell::Int(n.into()),
        DuckValue::BigInt(n) => Cell::Int(n.into()),
        DuckValue::HugeInt(n) => Cell::Int(n),
        DuckValue::UTinyInt(n) => Cell::Int(n.into()),
        DuckValue::USmallInt(n) => Cell::Int(n.into()),
        DuckValue::UInt(n) => Cell::Int(n.into()),
        DuckValue::UBigInt(n) => Cell::Int(n.into()),
        DuckValue::Float(f) => Cell::Float(f.into()),
        DuckValue::Double(f) => Cell::Float(f),
        DuckValue::Decimal(d) => Cell::Decimal(d),
        DuckValue::Text(s) => Cell::Text(s),
        DuckValue::Enum(s) => Cell::Text(s),
        DuckValue::Blob(b) => Cell::Blob(b),
        DuckValue::Date32(days) => chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163)
            .map_or_else(|| Cell::Other(days.to_string()), Cell::Date),
        DuckValue::Time64(unit, v) => {
            let us = micros(unit, v);
            chrono::NaiveTime::from_num_seconds_from_midnight_opt(
                (us / 1_000_000) as u32,
                ((us % 1_000_000) * 1_000) as u32,
            )
            .map_or_else(|| Cell::Other(v.to_string()), Cell::Time)
        }
        DuckValue::Timestamp(unit, v) => chrono::DateTime::from_timestamp_micros(micros(unit, v))
            .map_or_else(|| Cell::Other(v.to_string()), |dt| Cell::Timestamp(dt.naive_utc())),
        DuckValue::List(items) => Cell::List(items.into_iter().map(to_cell).collect()),
        other => Cell::Other(format!("{:?}", other)),
    }
}

/// Type name for a column whose declared type is not reported.
fn type_hint(cell: &Cell) -> &'static str {
    match cell {
        Cell::Bool(_) => "BOOLEAN",
        Cell::Int(_) => "HUGEINT",
        Cell::Float(_) => "DOUBLE",
        Cell::Decimal(_) => "DECIMAL",
        Cell::Blob(_) => "BLOB",
        Cell::Date(_) => "DATE",
        Cell::Time(_) => "TIME",
        Cell::Timestamp(_) => "TIMESTAMP",
        Cell::List(items) => match items.iter().find(|c| !matches!(c, Cell::Null)) {
            Some(Cell::Int(_)) => "BIGINT[]",
            Some(Cell::Float(_)) => "DOUBLE[]",
            Some(Cell::Bool(_)) => "BOOLEAN[]",
            _ => "VARCHAR[]",
        },
        Cell::Null | Cell::Text(_) => "VARCHAR",
        Cell::Other(_) => "UNKNOWN",
    }
}
