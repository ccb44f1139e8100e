//! CASE WHEN expression builders.

use crate::ast::Expr;

/// Start a searched CASE expression: CASE WHEN cond THEN value ...
pub fn case_when(condition: impl Into<Expr>, then_expr: impl Into<Expr>) -> CaseBuilder {
    CaseBuilder {
        operand: None,
        branches: vec![(condition.into(), then_expr.into())],
        else_value: None,
    }
}

/// Start a simple CASE expression: CASE operand WHEN value THEN ...
pub fn case_of(operand: impl Into<Expr>) -> CaseBuilder {
    CaseBuilder {
        operand: Some(Box::new(operand.into())),
        branches: Vec::new(),
        else_value: None,
    }
}

/// Builder for CASE expressions
#[derive(Debug, Clone)]
pub struct CaseBuilder {
    pub(crate) operand: Option<Box<Expr>>,
    pub(crate) branches: Vec<(Expr, Expr)>,
    pub(crate) else_value: Option<Box<Expr>>,
}

impl CaseBuilder {
    /// Add another WHEN clause
    pub fn when(mut self, condition: impl Into<Expr>, then_expr: impl Into<Expr>) -> Self {
        self.branches.push((condition.into(), then_expr.into()));
        self
    }

    /// Add ELSE clause
    pub fn otherwise(mut self, else_expr: impl Into<Expr>) -> Self {
        self.else_value = Some(Box::new(else_expr.into()));
        self
    }

    pub fn alias(self, name: &str) -> Expr {
        Expr::Aliased {
            expr: Box::new(self.build()),
            alias: name.to_string(),
        }
    }

    pub fn build(self) -> Expr {
        Expr::Case {
            operand: self.operand,
            branches: self.branches,
            else_value: self.else_value,
        }
    }
}

impl From<CaseBuilder> for Expr {
    fn from(builder: CaseBuilder) -> Self {
        builder.build()
    }
}
