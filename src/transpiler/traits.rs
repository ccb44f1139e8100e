//! Dialect compiler trait and identifier escaping.

use crate::ast::IntervalUnit;
use crate::error::{SqlError, SqlResult};
use crate::transpiler::dialect::{
    BooleanLiterals, Capability, DialectPolicy, IdentifierCase, TimestampPrecision,
};
use crate::transpiler::scan::FileFormat;

/// Wrap a name in double quotes, doubling any embedded quote.
pub fn escape_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Dialect-specific rendering hooks.
///
/// Every method has a standard-SQL default driven by the policy; a dialect
/// overrides only what it spells differently. Implementations are shared
/// read-only across threads.
pub trait DialectCompiler: Send + Sync {
    /// Dialect name used in error messages.
    fn name(&self) -> &'static str;

    fn policy(&self) -> &DialectPolicy;

    /// Quote a single identifier part (table, column, alias).
    fn quote_identifier(&self, name: &str) -> String {
        let policy = self.policy();
        let folded = match policy.identifier_case {
            IdentifierCase::Preserve => name.to_string(),
            IdentifierCase::Lower => name.to_lowercase(),
            IdentifierCase::Upper => name.to_uppercase(),
        };
        if policy.quote_identifiers {
            escape_identifier(&folded)
        } else {
            folded
        }
    }

    fn bool_literal(&self, val: bool) -> String {
        match (self.policy().boolean_literals, val) {
            (BooleanLiterals::Keywords, true) => "TRUE".to_string(),
            (BooleanLiterals::Keywords, false) => "FALSE".to_string(),
            (BooleanLiterals::Numeric, true) => "1".to_string(),
            (BooleanLiterals::Numeric, false) => "0".to_string(),
        }
    }

    /// chrono format string for timestamp literals.
    fn timestamp_format(&self) -> &'static str {
        match self.policy().timestamp_precision {
            TimestampPrecision::Seconds => "%Y-%m-%d %H:%M:%S",
            TimestampPrecision::Microseconds => "%Y-%m-%d %H:%M:%S%.6f",
        }
    }

    /// Blob literal from raw bytes.
    fn blob_literal(&self, bytes: &[u8]) -> String {
        format!("'{}'", hex::encode(bytes))
    }

    /// Case-insensitive pattern match over already rendered operands.
    fn case_insensitive_like(&self, expr: &str, pattern: &str, negated: bool) -> String {
        let op = if negated { "NOT ILIKE" } else { "ILIKE" };
        format!("{} {} {}", expr, op, pattern)
    }

    /// Regular expression match over already rendered operands.
    fn regex_match(&self, expr: &str, pattern: &str, case_insensitive: bool, negated: bool) -> String {
        let op = match (case_insensitive, negated) {
            (false, false) => "~",
            (true, false) => "~*",
            (false, true) => "!~",
            (true, true) => "!~*",
        };
        format!("({} {} {})", expr, op, pattern)
    }

    /// One `INTERVAL n UNIT` term of date arithmetic.
    fn interval_term(&self, amount: i64, unit: IntervalUnit) -> String {
        format!("INTERVAL {} {}", amount, unit.sql_keyword())
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }
        if let Some(n) = offset {
            sql.push_str(&format!(" OFFSET {}", n));
        }
        sql
    }

    /// Table function reading files of the given format, if the dialect has one.
    fn scan_function(&self, _format: FileFormat) -> Option<&'static str> {
        None
    }

    /// Fail with an unsupported-feature error unless the policy allows it.
    fn require(&self, capability: Capability) -> SqlResult<()> {
        if self.policy().supports(capability) {
            Ok(())
        } else {
            Err(SqlError::unsupported(capability.feature_name(), self.name()))
        }
    }
}
