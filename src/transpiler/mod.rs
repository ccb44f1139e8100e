//! SQL transpiler for query descriptors.
//!
//! Converts `ast` nodes into DuckDB SQL strings. Rendering is a pure
//! function of the node and the `DialectCompiler`; the same inputs always
//! produce byte-identical text.

pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod expressions;
pub mod identifiers;
pub mod literals;
pub mod scan;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::error::SqlResult;

pub use dialect::{Capability, DialectPolicy};
pub use dml::insert::InsertPlan;
pub use sql::duckdb::DuckDbCompiler;
pub use traits::{escape_identifier, DialectCompiler};

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to SQL with the default DuckDB compiler.
    fn to_sql(&self) -> SqlResult<String> {
        self.to_sql_with(&DuckDbCompiler::default())
    }

    /// Convert this node to SQL with a specific compiler.
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String>;
}

impl ToSql for Expr {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        expressions::compile_expr(self, compiler)
    }
}

impl ToSql for Value {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        literals::render_value(self, compiler)
    }
}

impl ToSql for Dataset {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        dml::select::build_select(self, compiler)
    }
}

/// Statements are joined with `; ` when the policy emits one INSERT per row.
impl ToSql for Insert {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        Ok(dml::insert::build_insert(self, compiler)?.statements.join("; "))
    }
}

impl ToSql for Update {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        dml::update::build_update(self, compiler)
    }
}

impl ToSql for Delete {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        dml::delete::build_delete(self, compiler)
    }
}

macro_rules! ddl_to_sql {
    ($($ty:ident => $build:path),* $(,)?) => {
        $(
            impl ToSql for $ty {
                fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
                    $build(self, compiler)
                }
            }
        )*
    };
}

ddl_to_sql! {
    CreateSchema => ddl::build_create_schema,
    DropSchema => ddl::build_drop_schema,
    CreateTable => ddl::build_create_table,
    DropTable => ddl::build_drop_table,
    CreateSequence => ddl::build_create_sequence,
    Transaction => ddl::build_transaction,
}

impl ToSql for Statement {
    fn to_sql_with(&self, compiler: &dyn DialectCompiler) -> SqlResult<String> {
        match self {
            Statement::Select(ds) => dml::select::build_select(ds, compiler),
            Statement::Insert(ins) => ins.to_sql_with(compiler),
            Statement::Update(up) => dml::update::build_update(up, compiler),
            Statement::Delete(del) => dml::delete::build_delete(del, compiler),
            Statement::CreateSchema(s) => ddl::build_create_schema(s, compiler),
            Statement::DropSchema(s) => ddl::build_drop_schema(s, compiler),
            Statement::CreateTable(s) => ddl::build_create_table(s, compiler),
            Statement::DropTable(s) => ddl::build_drop_table(s, compiler),
            Statement::CreateSequence(s) => ddl::build_create_sequence(s, compiler),
            Statement::Transaction(t) => ddl::build_transaction(t, compiler),
        }
    }
}
