//! DELETE SQL generation.

use crate::ast::Delete;
use crate::error::SqlResult;
use crate::transpiler::dml::{returning_clause, where_clause};
use crate::transpiler::identifiers::table_ref;
use crate::transpiler::traits::DialectCompiler;

/// Generate DELETE SQL.
pub fn build_delete(delete: &Delete, c: &dyn DialectCompiler) -> SqlResult<String> {
    let returning = returning_clause(&delete.returning, c)?;
    Ok(format!(
        "DELETE FROM {}{}{}",
        table_ref(&delete.table, c),
        where_clause(delete.filter.as_ref(), c)?,
        returning
    ))
}
