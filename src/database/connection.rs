//! Connection sum type.

use crate::error::SqlResult;
use crate::types::Cell;

use super::mock::MockConnection;
#[cfg(feature = "duckdb")]
use super::native::NativeConnection;

/// Untyped rows as returned by a connection.
///
/// `types` holds one DuckDB type name per column; `Database` parses them and
/// typecasts every cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub types: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    pub fn new<C, T>(columns: impl IntoIterator<Item = (C, T)>) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        let (columns, types) = columns
            .into_iter()
            .map(|(c, t)| (c.into(), t.into()))
            .unzip();
        Self {
            columns,
            types,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A DuckDB connection. Which backend is in use is decided at construction.
#[derive(Debug)]
pub enum Connection {
    Mock(MockConnection),
    #[cfg(feature = "duckdb")]
    Native(NativeConnection),
}

impl Connection {
    /// Run a statement that returns no rows. Returns the affected row count.
    pub fn execute(&mut self, sql: &str) -> SqlResult<usize> {
        match self {
            Connection::Mock(conn) => conn.execute(sql),
            #[cfg(feature = "duckdb")]
            Connection::Native(conn) => conn.execute(sql),
        }
    }

    /// Run a query and collect every row.
    pub fn query(&mut self, sql: &str) -> SqlResult<ResultSet> {
        match self {
            Connection::Mock(conn) => conn.query(sql),
            #[cfg(feature = "duckdb")]
            Connection::Native(conn) => conn.query(sql),
        }
    }

    pub fn as_mock(&self) -> Option<&MockConnection> {
        match self {
            Connection::Mock(conn) => Some(conn),
            #[cfg(feature = "duckdb")]
            _ => None,
        }
    }

    pub fn as_mock_mut(&mut self) -> Option<&mut MockConnection> {
        match self {
            Connection::Mock(conn) => Some(conn),
            #[cfg(feature = "duckdb")]
            _ => None,
        }
    }
}

impl From<MockConnection> for Connection {
    fn from(conn: MockConnection) -> Self {
        Connection::Mock(conn)
    }
}

#[cfg(feature = "duckdb")]
impl From<NativeConnection> for Connection {
    fn from(conn: NativeConnection) -> Self {
        Connection::Native(conn)
    }
}
