//! Column references and literals.

use crate::ast::{Expr, Value};

/// A bare column reference. Dots are part of the name; use `qcol` to qualify.
pub fn col(name: &str) -> Expr {
    Expr::Column(name.to_string())
}

/// table.column
pub fn qcol(table: &str, column: &str) -> Expr {
    Expr::Qualified {
        table: table.to_string(),
        column: column.to_string(),
    }
}

/// All columns (*)
pub fn star() -> Expr {
    Expr::Star
}

/// table.*
pub fn qstar(table: &str) -> Expr {
    Expr::QualifiedStar(table.to_string())
}

/// A literal value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// NULL literal
pub fn null() -> Expr {
    Expr::Literal(Value::Null)
}

/// Raw SQL, emitted without quoting or escaping.
pub fn raw(sql: &str) -> Expr {
    Expr::Raw(sql.to_string())
}
