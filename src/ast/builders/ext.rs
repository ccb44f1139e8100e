//! Extension traits for Expr.

use crate::ast::{BinaryOp, CompareOp, Expr, InSet, Interval, OrderTerm, WindowSpec};

/// Fluent methods on any expression, for predicates whose left side is not
/// a bare column.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    /// expr AS alias
    fn alias(self, alias: &str) -> Expr {
        Expr::Aliased {
            expr: Box::new(self.into_expr()),
            alias: alias.to_string(),
        }
    }

    /// CAST(expr AS type)
    fn cast(self, target_type: &str) -> Expr {
        Expr::Cast {
            expr: Box::new(self.into_expr()),
            target_type: target_type.to_string(),
        }
    }

    fn compare(self, op: CompareOp, other: impl Into<Expr>) -> Expr {
        Expr::Compare {
            left: Box::new(self.into_expr()),
            op,
            right: Box::new(other.into()),
        }
    }

    fn equals(self, other: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Eq, other)
    }

    fn not_equals(self, other: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Ne, other)
    }

    fn greater_than(self, other: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Gt, other)
    }

    fn less_than(self, other: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Lt, other)
    }

    fn like(self, pattern: impl Into<Expr>) -> Expr {
        Expr::Like {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            case_insensitive: false,
            negated: false,
            escape: None,
        }
    }

    /// LIKE with an explicit ESCAPE character
    fn like_escape(self, pattern: impl Into<Expr>, escape: char) -> Expr {
        Expr::Like {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            case_insensitive: false,
            negated: false,
            escape: Some(escape),
        }
    }

    fn ilike(self, pattern: impl Into<Expr>) -> Expr {
        Expr::Like {
            expr: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            case_insensitive: true,
            negated: false,
            escape: None,
        }
    }

    fn in_list<E: Into<Expr>>(self, items: impl IntoIterator<Item = E>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            set: InSet::List(items.into_iter().map(Into::into).collect()),
            negated: false,
        }
    }

    fn between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        Expr::Range {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            exclusive: false,
            negated: false,
        }
    }

    fn binary(self, op: BinaryOp, other: impl Into<Expr>) -> Expr {
        Expr::Binary {
            left: Box::new(self.into_expr()),
            op,
            right: Box::new(other.into()),
        }
    }

    fn plus(self, other: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Add, other)
    }

    fn minus(self, other: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Sub, other)
    }

    fn concat(self, other: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Concat, other)
    }

    /// base + INTERVAL ..., cast to TIMESTAMP
    fn add_interval(self, interval: Interval) -> Expr {
        Expr::DateAdd {
            base: Box::new(self.into_expr()),
            interval,
            cast_type: None,
        }
    }

    fn over(self, spec: WindowSpec) -> Expr {
        Expr::Window {
            func: Box::new(self.into_expr()),
            spec,
        }
    }

    fn asc(self) -> OrderTerm {
        OrderTerm::asc(self.into_expr())
    }

    fn desc(self) -> OrderTerm {
        OrderTerm::desc(self.into_expr())
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}
