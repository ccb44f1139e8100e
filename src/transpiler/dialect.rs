//! Dialect policy: the quirks and capabilities a compiler consults.

use serde::{Deserialize, Serialize};

/// Case folding applied to identifiers before quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCase {
    #[default]
    Preserve,
    Lower,
    Upper,
}

/// Spelling of boolean literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanLiterals {
    /// TRUE / FALSE
    #[default]
    Keywords,
    /// 1 / 0
    Numeric,
}

/// How case-insensitive pattern matches are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IlikeStrategy {
    /// (UPPER(x) LIKE UPPER(p))
    #[default]
    UpperLike,
    /// (x ILIKE p)
    Native,
}

/// Fractional seconds kept in timestamp literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPrecision {
    /// Truncate to whole seconds
    #[default]
    Seconds,
    /// Keep six fractional digits
    Microseconds,
}

/// How an INSERT with several rows is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiInsert {
    /// One statement with VALUES (...), (...)
    #[default]
    Values,
    /// One statement per row
    Separate,
}

/// Optional clauses a dialect may or may not be able to express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Returning,
    Savepoints,
    IsolationLevels,
    RowLocks,
    WindowFunctions,
    CommonTableExpressions,
    Qualify,
    DistinctOn,
}

impl Capability {
    /// Name used in "not supported" errors.
    pub fn feature_name(&self) -> &'static str {
        match self {
            Capability::Returning => "RETURNING",
            Capability::Savepoints => "savepoints",
            Capability::IsolationLevels => "transaction isolation levels",
            Capability::RowLocks => "FOR UPDATE / FOR SHARE",
            Capability::WindowFunctions => "window functions",
            Capability::CommonTableExpressions => "common table expressions",
            Capability::Qualify => "QUALIFY",
            Capability::DistinctOn => "DISTINCT ON",
        }
    }
}

/// Immutable record of dialect quirks.
///
/// Constructed once (directly, or from the `[duckdb.dialect]` table of
/// `qail.toml`) and shared read-only by every compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectPolicy {
    pub quote_identifiers: bool,
    pub identifier_case: IdentifierCase,
    pub boolean_literals: BooleanLiterals,
    pub ilike: IlikeStrategy,
    /// ESCAPE character appended to every LIKE; None emits no ESCAPE clause
    pub like_escape: Option<char>,
    pub timestamp_precision: TimestampPrecision,
    pub multi_insert: MultiInsert,
    pub supports_returning: bool,
    pub supports_savepoints: bool,
    pub supports_isolation_levels: bool,
    pub supports_row_locks: bool,
    pub supports_window_functions: bool,
    pub supports_cte: bool,
    pub supports_qualify: bool,
    pub supports_distinct_on: bool,
}

impl Default for DialectPolicy {
    fn default() -> Self {
        Self::duckdb()
    }
}

impl DialectPolicy {
    /// DuckDB defaults.
    pub fn duckdb() -> Self {
        Self {
            quote_identifiers: true,
            identifier_case: IdentifierCase::Preserve,
            boolean_literals: BooleanLiterals::Keywords,
            ilike: IlikeStrategy::UpperLike,
            like_escape: None,
            timestamp_precision: TimestampPrecision::Seconds,
            multi_insert: MultiInsert::Values,
            supports_returning: false,
            supports_savepoints: false,
            supports_isolation_levels: false,
            supports_row_locks: false,
            supports_window_functions: true,
            supports_cte: true,
            supports_qualify: true,
            supports_distinct_on: true,
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Returning => self.supports_returning,
            Capability::Savepoints => self.supports_savepoints,
            Capability::IsolationLevels => self.supports_isolation_levels,
            Capability::RowLocks => self.supports_row_locks,
            Capability::WindowFunctions => self.supports_window_functions,
            Capability::CommonTableExpressions => self.supports_cte,
            Capability::Qualify => self.supports_qualify,
            Capability::DistinctOn => self.supports_distinct_on,
        }
    }

    pub fn with_quoting(mut self, enabled: bool) -> Self {
        self.quote_identifiers = enabled;
        self
    }

    pub fn with_like_escape(mut self, escape: Option<char>) -> Self {
        self.like_escape = escape;
        self
    }

    pub fn with_timestamp_precision(mut self, precision: TimestampPrecision) -> Self {
        self.timestamp_precision = precision;
        self
    }

    pub fn with_multi_insert(mut self, strategy: MultiInsert) -> Self {
        self.multi_insert = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duckdb_capabilities() {
        let policy = DialectPolicy::default();
        assert!(!policy.supports(Capability::Returning));
        assert!(!policy.supports(Capability::Savepoints));
        assert!(policy.supports(Capability::Qualify));
        assert!(policy.supports(Capability::DistinctOn));
    }

    #[test]
    fn test_partial_policy_deserializes_with_defaults() {
        let policy: DialectPolicy =
            toml::from_str("ilike = \"native\"\nlike_escape = \"\\\\\"\n").unwrap();
        assert_eq!(policy.ilike, IlikeStrategy::Native);
        assert_eq!(policy.like_escape, Some('\\'));
        assert!(policy.quote_identifiers);
    }
}
