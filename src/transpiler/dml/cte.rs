//! CTE (Common Table Expression) SQL generation.

use crate::ast::CteDef;
use crate::error::SqlResult;
use crate::transpiler::dialect::Capability;
use crate::transpiler::dml::select::build_select;
use crate::transpiler::identifiers::name_list;
use crate::transpiler::traits::DialectCompiler;

/// Render the `WITH [RECURSIVE] ...` prefix (with trailing space), or
/// nothing when there are no CTEs.
///
/// RECURSIVE is a property of the whole clause: one recursive definition
/// marks every CTE in the list.
pub fn build_with(ctes: &[CteDef], c: &dyn DialectCompiler) -> SqlResult<String> {
    if ctes.is_empty() {
        return Ok(String::new());
    }
    c.require(Capability::CommonTableExpressions)?;

    let mut sql = String::from("WITH ");
    if ctes.iter().any(CteDef::is_recursive) {
        sql.push_str("RECURSIVE ");
    }
    let parts = ctes
        .iter()
        .map(|cte| build_single_cte(cte, c))
        .collect::<SqlResult<Vec<_>>>()?;
    sql.push_str(&parts.join(", "));
    sql.push(' ');
    Ok(sql)
}

/// Build a single CTE definition (without the WITH keyword)
pub fn build_single_cte(cte: &CteDef, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut sql = c.quote_identifier(&cte.name);
    if !cte.columns.is_empty() {
        sql.push('(');
        sql.push_str(&name_list(&cte.columns, c));
        sql.push(')');
    }
    sql.push_str(" AS (");
    sql.push_str(&build_select(&cte.query, c)?);
    if let Some(step) = &cte.recursive {
        sql.push_str(if step.union_all { " UNION ALL " } else { " UNION " });
        sql.push_str(&build_select(&step.query, c)?);
    }
    sql.push(')');
    Ok(sql)
}
