//! Expression tree compiler.
//!
//! Every comparison and boolean node renders inside its own parentheses so
//! nesting never depends on operator precedence.

use crate::ast::{CompareOp, Expr, InSet, LogicalOp, Value};
use crate::error::{SqlError, SqlResult};
use crate::transpiler::dialect::Capability;
use crate::transpiler::dml::select::build_select;
use crate::transpiler::dml::window::build_window_spec;
use crate::transpiler::identifiers::qualified;
use crate::transpiler::literals::render_value;
use crate::transpiler::traits::DialectCompiler;

/// Compile an expression to SQL text.
pub fn compile_expr(expr: &Expr, c: &dyn DialectCompiler) -> SqlResult<String> {
    match expr {
        Expr::Literal(v) => render_value(v, c),
        Expr::Column(name) => Ok(c.quote_identifier(name)),
        Expr::Qualified { table, column } => Ok(qualified(&[table.as_str(), column.as_str()], c)),
        Expr::Star => Ok("*".to_string()),
        Expr::QualifiedStar(table) => Ok(format!("{}.*", c.quote_identifier(table))),
        Expr::Raw(sql) => Ok(sql.clone()),
        Expr::Function {
            name,
            args,
            distinct,
        } => {
            let args = compile_list(args, c)?;
            if *distinct {
                Ok(format!("{}(DISTINCT {})", name, args))
            } else {
                Ok(format!("{}({})", name, args))
            }
        }
        Expr::Window { func, spec } => {
            c.require(Capability::WindowFunctions)?;
            Ok(format!(
                "{} OVER ({})",
                compile_expr(func, c)?,
                build_window_spec(spec, c)?
            ))
        }
        Expr::Compare { left, op, right } => compile_compare(left, *op, right, c),
        Expr::Logical { op, operands } => compile_logical(*op, operands, c),
        Expr::Not(inner) => Ok(format!("NOT {}", compile_expr(inner, c)?)),
        Expr::Binary { left, op, right } => Ok(format!(
            "({} {} {})",
            compile_expr(left, c)?,
            op,
            compile_expr(right, c)?
        )),
        Expr::Negate(inner) => {
            let inner = compile_expr(inner, c)?;
            // "--" would start a comment
            if inner.starts_with('-') {
                Ok(format!("-({})", inner))
            } else {
                Ok(format!("-{}", inner))
            }
        }
        Expr::Like {
            expr,
            pattern,
            case_insensitive,
            negated,
            escape,
        } => {
            let lhs = compile_expr(expr, c)?;
            let pat = compile_expr(pattern, c)?;
            let mut sql = if *case_insensitive {
                c.case_insensitive_like(&lhs, &pat, *negated)
            } else {
                let op = if *negated { "NOT LIKE" } else { "LIKE" };
                format!("{} {} {}", lhs, op, pat)
            };
            if let Some(ch) = escape.or(c.policy().like_escape) {
                sql.push_str(&format!(" ESCAPE {}", render_value(&Value::String(ch.to_string()), c)?));
            }
            Ok(format!("({})", sql))
        }
        Expr::Regex {
            expr,
            pattern,
            case_insensitive,
            negated,
        } => Ok(c.regex_match(
            &compile_expr(expr, c)?,
            &compile_expr(pattern, c)?,
            *case_insensitive,
            *negated,
        )),
        Expr::In { expr, set, negated } => compile_in(expr, set, *negated, c),
        Expr::Range {
            expr,
            low,
            high,
            exclusive,
            negated,
        } => {
            let e = compile_expr(expr, c)?;
            let lo = compile_expr(low, c)?;
            let hi = compile_expr(high, c)?;
            Ok(match (*negated, *exclusive) {
                (false, false) => format!("(({} >= {}) AND ({} <= {}))", e, lo, e, hi),
                (false, true) => format!("(({} >= {}) AND ({} < {}))", e, lo, e, hi),
                (true, false) => format!("(({} < {}) OR ({} > {}))", e, lo, e, hi),
                (true, true) => format!("(({} < {}) OR ({} >= {}))", e, lo, e, hi),
            })
        }
        Expr::Subquery(query) => Ok(format!("({})", build_select(query, c)?)),
        Expr::Exists { query, negated } => {
            let not = if *negated { "NOT " } else { "" };
            Ok(format!("{}EXISTS ({})", not, build_select(query, c)?))
        }
        Expr::Cast { expr, target_type } => {
            Ok(format!("CAST({} AS {})", compile_expr(expr, c)?, target_type))
        }
        Expr::DateAdd {
            base,
            interval,
            cast_type,
        } => {
            let mut sql = compile_expr(base, c)?;
            for (amount, unit) in &interval.terms {
                sql.push_str(" + ");
                sql.push_str(&c.interval_term(*amount, *unit));
            }
            Ok(format!(
                "CAST({} AS {})",
                sql,
                cast_type.as_deref().unwrap_or("TIMESTAMP")
            ))
        }
        Expr::Case {
            operand,
            branches,
            else_value,
        } => {
            if branches.is_empty() {
                return Err(SqlError::invalid("CASE requires at least one WHEN branch"));
            }
            let mut sql = String::from("(CASE");
            if let Some(op) = operand {
                sql.push(' ');
                sql.push_str(&compile_expr(op, c)?);
            }
            for (cond, value) in branches {
                sql.push_str(&format!(
                    " WHEN {} THEN {}",
                    compile_expr(cond, c)?,
                    compile_expr(value, c)?
                ));
            }
            if let Some(e) = else_value {
                sql.push_str(&format!(" ELSE {}", compile_expr(e, c)?));
            }
            sql.push_str(" END)");
            Ok(sql)
        }
        Expr::Aliased { expr, alias } => Ok(format!(
            "{} AS {}",
            compile_expr(expr, c)?,
            c.quote_identifier(alias)
        )),
    }
}

/// Comma-joined list of compiled expressions.
pub fn compile_list(exprs: &[Expr], c: &dyn DialectCompiler) -> SqlResult<String> {
    Ok(exprs
        .iter()
        .map(|e| compile_expr(e, c))
        .collect::<SqlResult<Vec<_>>>()?
        .join(", "))
}

fn compile_compare(left: &Expr, op: CompareOp, right: &Expr, c: &dyn DialectCompiler) -> SqlResult<String> {
    let lhs = compile_expr(left, c)?;
    // NULL and boolean right-hand sides become IS tests; IS never takes 1/0.
    let is_test = match (op, right) {
        (CompareOp::Eq | CompareOp::Is, Expr::Literal(v @ (Value::Null | Value::Bool(_)))) => {
            Some(("IS", v))
        }
        (CompareOp::Ne | CompareOp::IsNot, Expr::Literal(v @ (Value::Null | Value::Bool(_)))) => {
            Some(("IS NOT", v))
        }
        _ => None,
    };
    if let Some((kw, v)) = is_test {
        let rhs = match v {
            Value::Bool(true) => "TRUE",
            Value::Bool(false) => "FALSE",
            _ => "NULL",
        };
        return Ok(format!("({} {} {})", lhs, kw, rhs));
    }
    Ok(format!("({} {} {})", lhs, op.sql_symbol(), compile_expr(right, c)?))
}

fn compile_logical(op: LogicalOp, operands: &[Expr], c: &dyn DialectCompiler) -> SqlResult<String> {
    match operands {
        [] => Err(SqlError::invalid(format!(
            "{} requires at least one operand",
            op.sql_keyword()
        ))),
        [single] => compile_expr(single, c),
        _ => {
            let parts = operands
                .iter()
                .map(|e| compile_expr(e, c))
                .collect::<SqlResult<Vec<_>>>()?;
            Ok(format!("({})", parts.join(&format!(" {} ", op.sql_keyword()))))
        }
    }
}

fn compile_in(expr: &Expr, set: &InSet, negated: bool, c: &dyn DialectCompiler) -> SqlResult<String> {
    let op = if negated { "NOT IN" } else { "IN" };
    match set {
        // x IN () is a syntax error; use a constant predicate instead
        InSet::List(items) if items.is_empty() => Ok(if negated {
            "(1 = 1)".to_string()
        } else {
            "(1 = 0)".to_string()
        }),
        InSet::List(items) => Ok(format!(
            "({} {} ({}))",
            compile_expr(expr, c)?,
            op,
            compile_list(items, c)?
        )),
        InSet::Subquery(query) => Ok(format!(
            "({} {} ({}))",
            compile_expr(expr, c)?,
            op,
            build_select(query, c)?
        )),
    }
}
