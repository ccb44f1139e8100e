//! Function call builders.

use crate::ast::{Expr, WindowSpec};

use super::columns::col;

/// Builder for function calls
#[derive(Debug, Clone)]
pub struct FunctionBuilder {
    pub(crate) name: String,
    pub(crate) args: Vec<Expr>,
    pub(crate) distinct: bool,
}

/// Arbitrary function call: name(args)
pub fn func<E: Into<Expr>>(name: &str, args: impl IntoIterator<Item = E>) -> FunctionBuilder {
    FunctionBuilder {
        name: name.to_string(),
        args: args.into_iter().map(Into::into).collect(),
        distinct: false,
    }
}

impl FunctionBuilder {
    /// name(DISTINCT args)
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// name(args) OVER (...)
    pub fn over(self, spec: WindowSpec) -> Expr {
        Expr::Window {
            func: Box::new(self.build()),
            spec,
        }
    }

    pub fn alias(self, name: &str) -> Expr {
        Expr::Aliased {
            expr: Box::new(self.build()),
            alias: name.to_string(),
        }
    }

    pub fn build(self) -> Expr {
        Expr::Function {
            name: self.name,
            args: self.args,
            distinct: self.distinct,
        }
    }
}

impl From<FunctionBuilder> for Expr {
    fn from(builder: FunctionBuilder) -> Self {
        builder.build()
    }
}

/// count(*)
pub fn count() -> FunctionBuilder {
    func("count", [Expr::Star])
}

/// count(DISTINCT column)
pub fn count_distinct(column: &str) -> FunctionBuilder {
    func("count", [col(column)]).distinct()
}

pub fn sum(column: &str) -> FunctionBuilder {
    func("sum", [col(column)])
}

pub fn avg(column: &str) -> FunctionBuilder {
    func("avg", [col(column)])
}

pub fn min(column: &str) -> FunctionBuilder {
    func("min", [col(column)])
}

pub fn max(column: &str) -> FunctionBuilder {
    func("max", [col(column)])
}

pub fn coalesce<E: Into<Expr>>(args: impl IntoIterator<Item = E>) -> FunctionBuilder {
    func("coalesce", args)
}

pub fn row_number() -> FunctionBuilder {
    func("row_number", Vec::<Expr>::new())
}

pub fn rank() -> FunctionBuilder {
    func("rank", Vec::<Expr>::new())
}
