//! Dialect implementations of `DialectCompiler`.

pub mod duckdb;
