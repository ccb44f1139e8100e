//! SELECT SQL generation.

use crate::ast::cmd::COMPOUND_ALIAS;
use crate::ast::{Dataset, Distinct, Join, JoinCondition, Source};
use crate::error::{SqlError, SqlResult};
use crate::transpiler::dialect::Capability;
use crate::transpiler::dml::cte::build_with;
use crate::transpiler::dml::where_clause;
use crate::transpiler::dml::window::build_order_terms;
use crate::transpiler::expressions::{compile_expr, compile_list};
use crate::transpiler::identifiers::{name_list, table_ref};
use crate::transpiler::traits::DialectCompiler;

/// Reject structurally invalid or unsupported datasets before rendering.
fn validate(ds: &Dataset, c: &dyn DialectCompiler) -> SqlResult<()> {
    if ds.lock.is_some() {
        c.require(Capability::RowLocks)?;
    }
    if matches!(ds.distinct, Distinct::On(_)) {
        c.require(Capability::DistinctOn)?;
    }
    if ds.qualify.is_some() {
        c.require(Capability::Qualify)?;
    }
    if ds.lock.is_some() && !ds.compounds.is_empty() {
        return Err(SqlError::invalid("row locks cannot be combined with set operations"));
    }
    if !ds.joins.is_empty() && ds.from.is_empty() {
        return Err(SqlError::invalid("JOIN requires a FROM source"));
    }
    for join in &ds.joins {
        let has_condition = !matches!(join.condition, JoinCondition::None);
        if join.kind.takes_condition() != has_condition {
            return Err(SqlError::invalid(if has_condition {
                format!("{} does not take a join condition", join.kind.sql_keyword())
            } else {
                format!("{} requires ON or USING", join.kind.sql_keyword())
            }));
        }
        if matches!(&join.condition, JoinCondition::Using(cols) if cols.is_empty()) {
            return Err(SqlError::invalid("USING requires at least one column"));
        }
    }
    Ok(())
}

/// Generate SELECT SQL.
pub fn build_select(ds: &Dataset, c: &dyn DialectCompiler) -> SqlResult<String> {
    validate(ds, c)?;

    let mut sql = build_with(&ds.ctes, c)?;
    sql.push_str("SELECT ");

    match &ds.distinct {
        Distinct::None => {}
        Distinct::All => sql.push_str("DISTINCT "),
        Distinct::On(exprs) => {
            sql.push_str(&format!("DISTINCT ON ({}) ", compile_list(exprs, c)?));
        }
    }

    if ds.columns.is_empty() {
        sql.push('*');
    } else {
        sql.push_str(&compile_list(&ds.columns, c)?);
    }

    if !ds.from.is_empty() {
        let sources = ds
            .from
            .iter()
            .map(|s| build_source(s, c))
            .collect::<SqlResult<Vec<_>>>()?;
        sql.push_str(" FROM ");
        sql.push_str(&sources.join(", "));
    }

    for join in &ds.joins {
        sql.push_str(&build_join(join, c)?);
    }

    sql.push_str(&where_clause(ds.filter.as_ref(), c)?);

    if !ds.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&compile_list(&ds.group_by, c)?);
    }
    if let Some(having) = &ds.having {
        sql.push_str(" HAVING ");
        sql.push_str(&compile_expr(having, c)?);
    }
    if let Some(qualify) = &ds.qualify {
        sql.push_str(" QUALIFY ");
        sql.push_str(&compile_expr(qualify, c)?);
    }

    for (op, other) in &ds.compounds {
        sql.push(' ');
        sql.push_str(op.sql_keyword());
        sql.push(' ');
        sql.push_str(&build_compound_operand(other, c)?);
    }

    if !ds.order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&build_order_terms(&ds.order, c)?);
    }

    sql.push_str(&c.limit_offset(ds.limit, ds.offset));

    if let Some(lock) = ds.lock {
        sql.push(' ');
        sql.push_str(lock.sql_clause());
    }

    Ok(sql)
}

/// Right-hand side of a set operation. Operands with their own WITH,
/// ordering, limits or set operations are wrapped so they bind as one unit.
fn build_compound_operand(other: &Dataset, c: &dyn DialectCompiler) -> SqlResult<String> {
    let sql = build_select(other, c)?;
    if other.needs_grouping() {
        Ok(format!(
            "SELECT * FROM ({}) AS {}",
            sql,
            c.quote_identifier(COMPOUND_ALIAS)
        ))
    } else {
        Ok(sql)
    }
}

/// A FROM or JOIN source with its alias.
pub fn build_source(source: &Source, c: &dyn DialectCompiler) -> SqlResult<String> {
    Ok(match source {
        Source::Table { table, alias } => match alias {
            Some(a) => format!("{} AS {}", table_ref(table, c), c.quote_identifier(a)),
            None => table_ref(table, c),
        },
        Source::Subquery { query, alias } => {
            format!("({}) AS {}", build_select(query, c)?, c.quote_identifier(alias))
        }
        Source::Function { call, alias } => match alias {
            Some(a) => format!("{} AS {}", compile_expr(call, c)?, c.quote_identifier(a)),
            None => compile_expr(call, c)?,
        },
    })
}

fn build_join(join: &Join, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut sql = format!(" {} {}", join.kind.sql_keyword(), build_source(&join.source, c)?);
    match &join.condition {
        JoinCondition::None => {}
        JoinCondition::On(expr) => {
            sql.push_str(" ON ");
            sql.push_str(&compile_expr(expr, c)?);
        }
        JoinCondition::Using(columns) => {
            sql.push_str(&format!(" USING ({})", name_list(columns, c)));
        }
    }
    Ok(sql)
}
