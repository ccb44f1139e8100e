//! INSERT SQL generation.

use crate::ast::{ConflictAction, Insert, OnConflict};
use crate::error::{SqlError, SqlResult};
use crate::transpiler::dialect::MultiInsert;
use crate::transpiler::dml::returning_clause;
use crate::transpiler::dml::select::build_select;
use crate::transpiler::expressions::{compile_expr, compile_list};
use crate::transpiler::identifiers::{name_list, table_ref};
use crate::transpiler::literals::quote_string;
use crate::transpiler::traits::DialectCompiler;

/// Rendered INSERT: the statements to run, in order, and the query that
/// reads back the generated id afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    pub statements: Vec<String>,
    pub last_insert_id: Option<String>,
}

fn validate(ins: &Insert) -> SqlResult<()> {
    if ins.source.is_some() && !ins.rows.is_empty() {
        return Err(SqlError::invalid("INSERT cannot take both VALUES rows and a SELECT source"));
    }
    let width = if ins.columns.is_empty() {
        ins.rows.first().map(Vec::len)
    } else {
        Some(ins.columns.len())
    };
    if let Some(width) = width {
        if let Some(bad) = ins.rows.iter().position(|r| r.len() != width) {
            return Err(SqlError::invalid(format!(
                "INSERT row {} has {} values, expected {}",
                bad,
                ins.rows[bad].len(),
                width
            )));
        }
    }
    if !ins.columns.is_empty() && ins.rows.is_empty() && ins.source.is_none() {
        return Err(SqlError::invalid("INSERT names columns but supplies no values"));
    }
    if let Some(OnConflict {
        action: ConflictAction::DoUpdate(assignments),
        ..
    }) = &ins.on_conflict
    {
        if assignments.is_empty() {
            return Err(SqlError::invalid("ON CONFLICT DO UPDATE requires assignments"));
        }
    }
    Ok(())
}

/// Generate the INSERT statement(s) and the last-id lookup.
pub fn build_insert(ins: &Insert, c: &dyn DialectCompiler) -> SqlResult<InsertPlan> {
    validate(ins)?;

    let target = table_ref(&ins.table, c);
    let mut head = format!("INSERT INTO {}", target);
    if !ins.columns.is_empty() {
        head.push_str(&format!(" ({})", name_list(&ins.columns, c)));
    }
    let tail = format!(
        "{}{}",
        build_on_conflict(ins.on_conflict.as_ref(), c)?,
        returning_clause(&ins.returning, c)?
    );

    let statements = if ins.is_default_values() {
        vec![format!("{} DEFAULT VALUES{}", head, tail)]
    } else if let Some(query) = &ins.source {
        vec![format!("{} {}{}", head, build_select(query, c)?, tail)]
    } else {
        let rows = ins
            .rows
            .iter()
            .map(|row| Ok(format!("({})", compile_list(row, c)?)))
            .collect::<SqlResult<Vec<_>>>()?;
        match c.policy().multi_insert {
            MultiInsert::Values => vec![format!("{} VALUES {}{}", head, rows.join(", "), tail)],
            MultiInsert::Separate => rows
                .iter()
                .map(|row| format!("{} VALUES {}{}", head, row, tail))
                .collect(),
        }
    };

    let last_insert_id = match (&ins.sequence, &ins.primary_key) {
        (Some(seq), _) => Some(format!("SELECT currval({})", quote_string(seq))),
        (None, Some(pk)) => Some(format!(
            "SELECT max({}) FROM {}",
            c.quote_identifier(pk),
            target
        )),
        (None, None) => None,
    };

    Ok(InsertPlan {
        statements,
        last_insert_id,
    })
}

/// ON CONFLICT clause (DuckDB follows the Postgres form)
fn build_on_conflict(on_conflict: Option<&OnConflict>, c: &dyn DialectCompiler) -> SqlResult<String> {
    let Some(oc) = on_conflict else {
        return Ok(String::new());
    };
    let mut sql = String::from(" ON CONFLICT");
    if !oc.columns.is_empty() {
        sql.push_str(&format!(" ({})", name_list(&oc.columns, c)));
    }
    match &oc.action {
        ConflictAction::DoNothing => sql.push_str(" DO NOTHING"),
        ConflictAction::DoUpdate(assignments) => {
            let sets = assignments
                .iter()
                .map(|(col, expr)| Ok(format!("{} = {}", c.quote_identifier(col), compile_expr(expr, c)?)))
                .collect::<SqlResult<Vec<_>>>()?;
            sql.push_str(" DO UPDATE SET ");
            sql.push_str(&sets.join(", "));
        }
    }
    Ok(sql)
}
