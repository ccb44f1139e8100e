//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: SELECT, UPDATE, DELETE, INSERT
//! - `expressions`: predicate and expression rendering
//! - `features`: CTEs, windows, set operations, DDL, transactions, policy switches

mod features;

use crate::transpiler::{DialectPolicy, DuckDbCompiler};

/// Compiler with identifier quoting turned off, for compact expectations.
pub(super) fn bare() -> DuckDbCompiler {
    DuckDbCompiler::new(DialectPolicy::duckdb().with_quoting(false))
}
