//! Predicate builders (eq, gt, like, between, ...).
//!
//! The column argument is a bare column name; for anything more complex
//! start from an `Expr` and use the `ExprExt` methods instead.

use crate::ast::{CompareOp, Dataset, Expr, InSet, LogicalOp, Value};

use super::columns::col;

/// Generic comparison between two expressions.
pub fn cmp(left: impl Into<Expr>, op: CompareOp, right: impl Into<Expr>) -> Expr {
    Expr::Compare {
        left: Box::new(left.into()),
        op,
        right: Box::new(right.into()),
    }
}

fn compare(column: &str, op: CompareOp, value: impl Into<Value>) -> Expr {
    cmp(col(column), op, Expr::Literal(value.into()))
}

/// column = value (NULL and booleans render as IS tests)
pub fn eq(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Eq, value)
}

pub fn ne(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Ne, value)
}

pub fn gt(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Gt, value)
}

pub fn gte(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Gte, value)
}

pub fn lt(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Lt, value)
}

pub fn lte(column: &str, value: impl Into<Value>) -> Expr {
    compare(column, CompareOp::Lte, value)
}

pub fn is_null(column: &str) -> Expr {
    compare(column, CompareOp::Is, Value::Null)
}

pub fn is_not_null(column: &str) -> Expr {
    compare(column, CompareOp::IsNot, Value::Null)
}

pub fn is_true(column: &str) -> Expr {
    compare(column, CompareOp::Is, true)
}

pub fn is_false(column: &str) -> Expr {
    compare(column, CompareOp::Is, false)
}

fn pattern(column: &str, pattern: &str, case_insensitive: bool, negated: bool) -> Expr {
    Expr::Like {
        expr: Box::new(col(column)),
        pattern: Box::new(Expr::from(pattern)),
        case_insensitive,
        negated,
        escape: None,
    }
}

pub fn like(column: &str, pat: &str) -> Expr {
    pattern(column, pat, false, false)
}

pub fn not_like(column: &str, pat: &str) -> Expr {
    pattern(column, pat, false, true)
}

/// Case-insensitive LIKE
pub fn ilike(column: &str, pat: &str) -> Expr {
    pattern(column, pat, true, false)
}

pub fn not_ilike(column: &str, pat: &str) -> Expr {
    pattern(column, pat, true, true)
}

fn regex_match(column: &str, pat: &str, case_insensitive: bool) -> Expr {
    Expr::Regex {
        expr: Box::new(col(column)),
        pattern: Box::new(Expr::from(pat)),
        case_insensitive,
        negated: false,
    }
}

/// regexp_matches(column, pattern)
pub fn regex(column: &str, pat: &str) -> Expr {
    regex_match(column, pat, false)
}

/// Case-insensitive regexp_matches
pub fn regex_i(column: &str, pat: &str) -> Expr {
    regex_match(column, pat, true)
}

pub fn is_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Expr {
    Expr::In {
        expr: Box::new(col(column)),
        set: InSet::List(values.into_iter().map(|v| Expr::Literal(v.into())).collect()),
        negated: false,
    }
}

pub fn not_in<V: Into<Value>>(column: &str, values: impl IntoIterator<Item = V>) -> Expr {
    is_in(column, values).invert()
}

/// column IN (SELECT ...)
pub fn in_subquery(column: &str, query: Dataset) -> Expr {
    Expr::In {
        expr: Box::new(col(column)),
        set: InSet::Subquery(Box::new(query)),
        negated: false,
    }
}

/// Inclusive range: low <= column <= high
pub fn between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Expr {
    Expr::Range {
        expr: Box::new(col(column)),
        low: Box::new(Expr::Literal(low.into())),
        high: Box::new(Expr::Literal(high.into())),
        exclusive: false,
        negated: false,
    }
}

/// Half-open range: low <= column < high
pub fn between_exclusive(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Expr {
    Expr::Range {
        expr: Box::new(col(column)),
        low: Box::new(Expr::Literal(low.into())),
        high: Box::new(Expr::Literal(high.into())),
        exclusive: true,
        negated: false,
    }
}

pub fn not_between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Expr {
    between(column, low, high).invert()
}

pub fn and<E: Into<Expr>>(operands: impl IntoIterator<Item = E>) -> Expr {
    Expr::Logical {
        op: LogicalOp::And,
        operands: operands.into_iter().map(Into::into).collect(),
    }
}

pub fn or<E: Into<Expr>>(operands: impl IntoIterator<Item = E>) -> Expr {
    Expr::Logical {
        op: LogicalOp::Or,
        operands: operands.into_iter().map(Into::into).collect(),
    }
}

pub fn not(expr: impl Into<Expr>) -> Expr {
    Expr::Not(Box::new(expr.into()))
}

pub fn exists(query: Dataset) -> Expr {
    Expr::Exists {
        query: Box::new(query),
        negated: false,
    }
}

pub fn not_exists(query: Dataset) -> Expr {
    Expr::Exists {
        query: Box::new(query),
        negated: true,
    }
}
