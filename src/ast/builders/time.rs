//! Time functions and interval arithmetic.

use crate::ast::{Expr, Interval};

/// now()
pub fn now() -> Expr {
    Expr::Function {
        name: "now".to_string(),
        args: vec![],
        distinct: false,
    }
}

/// CAST(base + INTERVAL ... AS TIMESTAMP)
pub fn date_add(base: impl Into<Expr>, interval: Interval) -> Expr {
    Expr::DateAdd {
        base: Box::new(base.into()),
        interval,
        cast_type: None,
    }
}

/// Same as `date_add` with every interval amount negated.
pub fn date_sub(base: impl Into<Expr>, interval: Interval) -> Expr {
    date_add(base, interval.negated())
}

/// Interval arithmetic cast to an explicit type (e.g. `DATE`).
pub fn date_add_as(base: impl Into<Expr>, interval: Interval, cast_type: &str) -> Expr {
    Expr::DateAdd {
        base: Box::new(base.into()),
        interval,
        cast_type: Some(cast_type.to_string()),
    }
}
