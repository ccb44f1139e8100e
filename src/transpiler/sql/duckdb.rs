//! DuckDB SQL dialect.
//!
//! DuckDB is PostgreSQL-compatible with a few departures the compiler cares
//! about:
//! - regex matching through `regexp_matches()` rather than `~`
//! - no RETURNING, savepoints, isolation levels or row locks
//! - QUALIFY and DISTINCT ON
//! - `read_parquet` / `read_csv` / `read_json` table functions

use crate::transpiler::dialect::{DialectPolicy, IlikeStrategy};
use crate::transpiler::scan::FileFormat;
use crate::transpiler::traits::DialectCompiler;

#[derive(Debug, Clone, Default)]
pub struct DuckDbCompiler {
    policy: DialectPolicy,
}

impl DuckDbCompiler {
    pub fn new(policy: DialectPolicy) -> Self {
        Self { policy }
    }
}

impl DialectCompiler for DuckDbCompiler {
    fn name(&self) -> &'static str {
        "DuckDB"
    }

    fn policy(&self) -> &DialectPolicy {
        &self.policy
    }

    fn case_insensitive_like(&self, expr: &str, pattern: &str, negated: bool) -> String {
        let not = if negated { "NOT " } else { "" };
        match self.policy.ilike {
            IlikeStrategy::UpperLike => format!("UPPER({}) {}LIKE UPPER({})", expr, not, pattern),
            IlikeStrategy::Native => format!("{} {}ILIKE {}", expr, not, pattern),
        }
    }

    fn regex_match(&self, expr: &str, pattern: &str, case_insensitive: bool, negated: bool) -> String {
        let call = if case_insensitive {
            format!("regexp_matches({}, {}, 'i')", expr, pattern)
        } else {
            format!("regexp_matches({}, {})", expr, pattern)
        };
        if negated {
            format!("(NOT {})", call)
        } else {
            format!("({})", call)
        }
    }

    fn scan_function(&self, format: FileFormat) -> Option<&'static str> {
        Some(match format {
            FileFormat::Parquet => "read_parquet",
            FileFormat::Csv => "read_csv",
            FileFormat::Json => "read_json",
        })
    }
}
