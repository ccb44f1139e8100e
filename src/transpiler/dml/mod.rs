//! DML (Data Manipulation Language) SQL generation.
//!
//! SELECT, INSERT, UPDATE and DELETE, plus the CTE and window pieces the
//! SELECT builder shares with the expression compiler.

pub mod cte;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;
pub mod window;

use crate::ast::Expr;
use crate::error::SqlResult;
use crate::transpiler::dialect::Capability;
use crate::transpiler::expressions::{compile_expr, compile_list};
use crate::transpiler::traits::DialectCompiler;

/// ` WHERE <predicate>` or nothing. Shared by SELECT, UPDATE and DELETE so
/// equal predicates always render identically.
pub fn where_clause(filter: Option<&Expr>, c: &dyn DialectCompiler) -> SqlResult<String> {
    match filter {
        Some(predicate) => Ok(format!(" WHERE {}", compile_expr(predicate, c)?)),
        None => Ok(String::new()),
    }
}

/// ` RETURNING ...` when the dialect allows it.
pub(crate) fn returning_clause(exprs: &[Expr], c: &dyn DialectCompiler) -> SqlResult<String> {
    if exprs.is_empty() {
        return Ok(String::new());
    }
    c.require(Capability::Returning)?;
    Ok(format!(" RETURNING {}", compile_list(exprs, c)?))
}
