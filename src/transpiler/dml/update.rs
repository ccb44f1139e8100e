//! UPDATE SQL generation.

use crate::ast::Update;
use crate::error::{SqlError, SqlResult};
use crate::transpiler::dml::{returning_clause, where_clause};
use crate::transpiler::expressions::compile_expr;
use crate::transpiler::identifiers::table_ref;
use crate::transpiler::traits::DialectCompiler;

/// Generate UPDATE SQL.
pub fn build_update(update: &Update, c: &dyn DialectCompiler) -> SqlResult<String> {
    if update.assignments.is_empty() {
        return Err(SqlError::invalid("UPDATE requires at least one assignment"));
    }
    let returning = returning_clause(&update.returning, c)?;

    let sets = update
        .assignments
        .iter()
        .map(|(col, expr)| Ok(format!("{} = {}", c.quote_identifier(col), compile_expr(expr, c)?)))
        .collect::<SqlResult<Vec<_>>>()?;

    Ok(format!(
        "UPDATE {} SET {}{}{}",
        table_ref(&update.table, c),
        sets.join(", "),
        where_clause(update.filter.as_ref(), c)?,
        returning
    ))
}
