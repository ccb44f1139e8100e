//! DDL and transaction statement generation.

use crate::ast::{
    ColumnDef, CreateSchema, CreateSequence, CreateTable, DropSchema, DropTable, Transaction,
};
use crate::error::{SqlError, SqlResult};
use crate::transpiler::dialect::Capability;
use crate::transpiler::dml::select::build_select;
use crate::transpiler::expressions::compile_expr;
use crate::transpiler::identifiers::{name_list, table_ref};
use crate::transpiler::traits::DialectCompiler;

fn reject_exists_with_replace(if_not_exists: bool, or_replace: bool, what: &str) -> SqlResult<()> {
    if if_not_exists && or_replace {
        return Err(SqlError::invalid(format!(
            "CREATE {} cannot combine IF NOT EXISTS with OR REPLACE",
            what
        )));
    }
    Ok(())
}

/// CREATE [OR REPLACE] SCHEMA [IF NOT EXISTS] name
pub fn build_create_schema(stmt: &CreateSchema, c: &dyn DialectCompiler) -> SqlResult<String> {
    reject_exists_with_replace(stmt.if_not_exists, stmt.or_replace, "SCHEMA")?;
    let mut sql = String::from("CREATE ");
    if stmt.or_replace {
        sql.push_str("OR REPLACE ");
    }
    sql.push_str("SCHEMA ");
    if stmt.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&c.quote_identifier(&stmt.name));
    Ok(sql)
}

pub fn build_drop_schema(stmt: &DropSchema, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut sql = String::from("DROP SCHEMA ");
    if stmt.if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&c.quote_identifier(&stmt.name));
    if stmt.cascade {
        sql.push_str(" CASCADE");
    }
    Ok(sql)
}

/// CREATE TABLE from column definitions or AS SELECT.
///
/// A single primary-key column is declared inline; several become a
/// table-level PRIMARY KEY constraint.
pub fn build_create_table(stmt: &CreateTable, c: &dyn DialectCompiler) -> SqlResult<String> {
    reject_exists_with_replace(stmt.if_not_exists, stmt.or_replace, "TABLE")?;
    match (stmt.columns.is_empty(), stmt.as_query.is_some()) {
        (true, false) => {
            return Err(SqlError::invalid("CREATE TABLE requires columns or AS SELECT"));
        }
        (false, true) => {
            return Err(SqlError::invalid(
                "CREATE TABLE cannot take both column definitions and AS SELECT",
            ));
        }
        _ => {}
    }

    let mut sql = String::from("CREATE ");
    if stmt.or_replace {
        sql.push_str("OR REPLACE ");
    }
    if stmt.temporary {
        sql.push_str("TEMPORARY ");
    }
    sql.push_str("TABLE ");
    if stmt.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&table_ref(&stmt.table, c));

    if let Some(query) = &stmt.as_query {
        sql.push_str(" AS ");
        sql.push_str(&build_select(query, c)?);
        return Ok(sql);
    }

    let pk: Vec<&str> = stmt
        .columns
        .iter()
        .filter(|col| col.primary_key)
        .map(|col| col.name.as_str())
        .collect();
    let inline_pk = pk.len() == 1;

    let mut defs = stmt
        .columns
        .iter()
        .map(|col| build_column_def(col, inline_pk, c))
        .collect::<SqlResult<Vec<_>>>()?;
    if pk.len() > 1 {
        defs.push(format!("PRIMARY KEY ({})", name_list(&pk, c)));
    }
    sql.push_str(&format!(" ({})", defs.join(", ")));
    Ok(sql)
}

fn build_column_def(col: &ColumnDef, inline_pk: bool, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut sql = format!("{} {}", c.quote_identifier(&col.name), col.data_type);
    if col.primary_key && inline_pk {
        sql.push_str(" PRIMARY KEY");
    }
    if col.unique {
        sql.push_str(" UNIQUE");
    }
    if !col.nullable {
        sql.push_str(" NOT NULL");
    }
    if let Some(default) = &col.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&compile_expr(default, c)?);
    }
    Ok(sql)
}

pub fn build_drop_table(stmt: &DropTable, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut sql = String::from("DROP TABLE ");
    if stmt.if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&table_ref(&stmt.table, c));
    if stmt.cascade {
        sql.push_str(" CASCADE");
    }
    Ok(sql)
}

pub fn build_create_sequence(stmt: &CreateSequence, c: &dyn DialectCompiler) -> SqlResult<String> {
    let mut sql = String::from("CREATE SEQUENCE ");
    if stmt.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&c.quote_identifier(&stmt.name));
    if let Some(start) = stmt.start {
        sql.push_str(&format!(" START WITH {}", start));
    }
    if let Some(step) = stmt.increment {
        sql.push_str(&format!(" INCREMENT BY {}", step));
    }
    Ok(sql)
}

/// Transaction control text. Isolation levels and savepoints are checked
/// against the dialect's capabilities.
pub fn build_transaction(stmt: &Transaction, c: &dyn DialectCompiler) -> SqlResult<String> {
    match stmt {
        Transaction::Begin { isolation: None } => Ok("BEGIN TRANSACTION".to_string()),
        Transaction::Begin {
            isolation: Some(level),
        } => {
            c.require(Capability::IsolationLevels)?;
            Ok(format!(
                "BEGIN TRANSACTION ISOLATION LEVEL {}",
                level.sql_keyword()
            ))
        }
        Transaction::Commit => Ok("COMMIT".to_string()),
        Transaction::Rollback => Ok("ROLLBACK".to_string()),
        Transaction::Savepoint(name) => {
            c.require(Capability::Savepoints)?;
            Ok(format!("SAVEPOINT {}", c.quote_identifier(name)))
        }
        Transaction::ReleaseSavepoint(name) => {
            c.require(Capability::Savepoints)?;
            Ok(format!("RELEASE SAVEPOINT {}", c.quote_identifier(name)))
        }
        Transaction::RollbackTo(name) => {
            c.require(Capability::Savepoints)?;
            Ok(format!("ROLLBACK TO SAVEPOINT {}", c.quote_identifier(name)))
        }
    }
}
