//! # qail-duckdb
//!
//! DuckDB dialect for QAIL: typed query descriptors in, DuckDB SQL out.
//!
//! ## Quick Example
//!
//! ```
//! use qail_duckdb::prelude::*;
//!
//! let query = Dataset::table("users")
//!     .select([col("id"), col("email")])
//!     .filter(ilike("name", "%john%"))
//!     .filter(eq("active", false))
//!     .limit(10);
//!
//! assert_eq!(
//!     query.to_sql().unwrap(),
//!     "SELECT \"id\", \"email\" FROM \"users\" \
//!      WHERE ((UPPER(\"name\") LIKE UPPER('%john%')) AND (\"active\" IS FALSE)) LIMIT 10"
//! );
//! ```
//!
//! ## Layout
//!
//! | Module       | Role                                              |
//! |--------------|---------------------------------------------------|
//! | `ast`        | Expressions, values, SELECT/DML/DDL descriptors   |
//! | `transpiler` | Dialect policy and the DuckDB SQL compiler        |
//! | `types`      | DuckDB type names and result-cell typecasting     |
//! | `database`   | Mock and native connections, schema introspection |
//! | `config`     | `[duckdb]` section of `qail.toml`                 |

pub mod ast;
pub mod config;
pub mod database;
pub mod error;
pub mod transpiler;
pub mod types;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::config::DuckDbConfig;
    pub use crate::database::{Database, MockConnection, ResultSet, Row};
    pub use crate::error::*;
    pub use crate::transpiler::{DialectCompiler, DialectPolicy, DuckDbCompiler, ToSql};
    pub use crate::types::{Cell, SchemaType};
}

/// Compile a statement with the default DuckDB policy.
///
/// ```
/// use qail_duckdb::{ast::Insert, compile};
///
/// assert_eq!(
///     compile(&Insert::table("users")).unwrap(),
///     "INSERT INTO \"users\" DEFAULT VALUES"
/// );
/// ```
pub fn compile(stmt: &dyn transpiler::ToSql) -> error::SqlResult<String> {
    stmt.to_sql()
}
