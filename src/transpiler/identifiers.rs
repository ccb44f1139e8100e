//! Identifier rendering: single names, qualified names, table references.

use crate::ast::TableRef;
use crate::transpiler::traits::DialectCompiler;

/// Render each part independently and join with `.`.
pub fn qualified(parts: &[&str], compiler: &dyn DialectCompiler) -> String {
    parts
        .iter()
        .map(|p| compiler.quote_identifier(p))
        .collect::<Vec<_>>()
        .join(".")
}

/// `"schema"."table"` or `"table"`
pub fn table_ref(table: &TableRef, compiler: &dyn DialectCompiler) -> String {
    match &table.schema {
        Some(schema) => qualified(&[schema.as_str(), table.name.as_str()], compiler),
        None => compiler.quote_identifier(&table.name),
    }
}

/// Comma-separated list of quoted names.
pub fn name_list<S: AsRef<str>>(names: &[S], compiler: &dyn DialectCompiler) -> String {
    names
        .iter()
        .map(|n| compiler.quote_identifier(n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::dialect::{DialectPolicy, IdentifierCase};
    use crate::transpiler::sql::duckdb::DuckDbCompiler;

    #[test]
    fn test_qualified_parts_quoted_independently() {
        let c = DuckDbCompiler::default();
        assert_eq!(qualified(&["items", "id"], &c), "\"items\".\"id\"");
        assert_eq!(
            table_ref(&TableRef::qualified("main", "my-table"), &c),
            "\"main\".\"my-table\""
        );
    }

    #[test]
    fn test_quoting_disabled_passes_through() {
        let c = DuckDbCompiler::new(DialectPolicy::duckdb().with_quoting(false));
        assert_eq!(c.quote_identifier("order"), "order");
        assert_eq!(qualified(&["t", "c"], &c), "t.c");
    }

    #[test]
    fn test_case_folding_before_quoting() {
        let mut policy = DialectPolicy::duckdb();
        policy.identifier_case = IdentifierCase::Lower;
        let c = DuckDbCompiler::new(policy);
        assert_eq!(c.quote_identifier("UserName"), "\"username\"");
    }
}
