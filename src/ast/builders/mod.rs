//! Ergonomic builder functions for query expressions.
//!
//! # Modules
//!
//! - `columns` - Column references and literals
//! - `conditions` - WHERE clause predicates (eq, gt, like, ...)
//! - `functions` - Function and aggregate calls
//! - `time` - now() and interval arithmetic
//! - `case_when` - CASE WHEN expressions
//! - `ext` - Extension trait for Expr
//!
//! # Example
//! ```
//! use qail_duckdb::ast::builders::*;
//! use qail_duckdb::ast::Dataset;
//!
//! let query = Dataset::table("orders")
//!     .select([col("id"), sum("total").alias("total")])
//!     .filter(eq("status", "paid"))
//!     .group_by([col("id")])
//!     .limit(10);
//! # let _ = query;
//! ```

pub mod case_when;
pub mod columns;
pub mod conditions;
pub mod ext;
pub mod functions;
pub mod time;

pub use case_when::{case_of, case_when, CaseBuilder};
pub use columns::{col, lit, null, qcol, qstar, raw, star};
pub use conditions::{
    and, between, between_exclusive, cmp, eq, exists, gt, gte, ilike, in_subquery, is_false,
    is_in, is_not_null, is_null, is_true, like, lt, lte, ne, not, not_between, not_exists,
    not_ilike, not_in, not_like, or, regex, regex_i,
};
pub use ext::ExprExt;
pub use functions::{
    avg, coalesce, count, count_distinct, func, max, min, rank, row_number, sum, FunctionBuilder,
};
pub use time::{date_add, date_add_as, date_sub, now};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, Expr, Interval, LogicalOp, WindowSpec};

    #[test]
    fn test_not_in_is_negated_in() {
        let e = not_in("id", [1, 2]);
        assert!(matches!(e, Expr::In { negated: true, .. }));
    }

    #[test]
    fn test_date_sub_negates_terms() {
        let e = date_sub(col("created_at"), Interval::new().days(2));
        match e {
            Expr::DateAdd { interval, .. } => assert_eq!(interval.terms[0].0, -2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_case_when() {
        let e = case_when(gt("x", 0), 1).otherwise(0).alias("sign");
        assert!(matches!(e, Expr::Aliased { alias, .. } if alias == "sign"));
    }

    #[test]
    fn test_window_builder() {
        let e = row_number().over(WindowSpec {
            partition: vec![col("dept")],
            ..Default::default()
        });
        assert!(matches!(e, Expr::Window { .. }));
    }

    #[test]
    fn test_and_or_builders() {
        let e = or([eq("a", 1), and([eq("b", 2), ne("c", 3)])]);
        match e {
            Expr::Logical { op: LogicalOp::Or, operands } => {
                assert!(matches!(&operands[1], Expr::Logical { op: LogicalOp::And, .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(is_null("x"), Expr::Compare { op: CompareOp::Is, .. }));
    }
}
