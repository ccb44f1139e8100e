//! Write statements: INSERT, UPDATE, DELETE.

use serde::{Deserialize, Serialize};

use crate::ast::{Dataset, Expr, TableRef};

use super::query::conjoin;

/// INSERT descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub table: TableRef,
    /// Target columns (empty = table order)
    #[serde(default)]
    pub columns: Vec<String>,
    /// Literal rows; each must match `columns` in arity
    #[serde(default)]
    pub rows: Vec<Vec<Expr>>,
    /// INSERT ... SELECT source (exclusive with `rows`)
    #[serde(default)]
    pub source: Option<Box<Dataset>>,
    #[serde(default)]
    pub on_conflict: Option<OnConflict>,
    #[serde(default)]
    pub returning: Vec<Expr>,
    /// Column used to look up the last inserted id
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Sequence feeding the primary key, if any
    #[serde(default)]
    pub sequence: Option<String>,
}

/// ON CONFLICT clause of an INSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnConflict {
    /// Conflict target columns
    pub columns: Vec<String>,
    pub action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConflictAction {
    DoNothing,
    /// DO UPDATE SET col = expr, ...
    DoUpdate(Vec<(String, Expr)>),
}

impl Insert {
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one row of values.
    pub fn values<I, E>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Insert a single record given as (column, value) pairs.
    pub fn record<I, S, E>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<String>,
        E: Into<Expr>,
    {
        let (columns, row): (Vec<String>, Vec<Expr>) = pairs
            .into_iter()
            .map(|(c, e)| (c.into(), e.into()))
            .unzip();
        self.columns = columns;
        self.rows = vec![row];
        self
    }

    /// INSERT INTO t [(cols)] SELECT ...
    pub fn select(mut self, query: Dataset) -> Self {
        self.source = Some(Box::new(query));
        self
    }

    pub fn on_conflict_do_nothing<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_conflict = Some(OnConflict {
            columns: columns.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoNothing,
        });
        self
    }

    pub fn on_conflict_do_update<I, S, A, C, E>(mut self, columns: I, assignments: A) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        A: IntoIterator<Item = (C, E)>,
        C: Into<String>,
        E: Into<Expr>,
    {
        self.on_conflict = Some(OnConflict {
            columns: columns.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoUpdate(
                assignments
                    .into_iter()
                    .map(|(c, e)| (c.into(), e.into()))
                    .collect(),
            ),
        });
        self
    }

    pub fn returning<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.returning = exprs.into_iter().map(Into::into).collect();
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    pub fn sequence(mut self, name: impl Into<String>) -> Self {
        self.sequence = Some(name.into());
        self
    }

    /// No columns, no rows and no source: renders DEFAULT VALUES.
    pub fn is_default_values(&self) -> bool {
        self.columns.is_empty() && self.source.is_none() && self.rows.iter().all(Vec::is_empty)
    }
}

/// UPDATE descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub table: TableRef,
    /// SET col = expr, in order
    pub assignments: Vec<(String, Expr)>,
    #[serde(default)]
    pub filter: Option<Expr>,
    #[serde(default)]
    pub returning: Vec<Expr>,
}

impl Update {
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.filter = Some(conjoin(self.filter.take(), predicate.into()));
        self
    }

    pub fn returning<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.returning = exprs.into_iter().map(Into::into).collect();
        self
    }
}

/// DELETE descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub table: TableRef,
    #[serde(default)]
    pub filter: Option<Expr>,
    #[serde(default)]
    pub returning: Vec<Expr>,
}

impl Delete {
    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.filter = Some(conjoin(self.filter.take(), predicate.into()));
        self
    }

    pub fn returning<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.returning = exprs.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sets_columns_and_row() {
        let ins = Insert::table("users").record([("name", Expr::from("a")), ("age", Expr::from(3))]);
        assert_eq!(ins.columns, vec!["name", "age"]);
        assert_eq!(ins.rows.len(), 1);
        assert!(!ins.is_default_values());
    }

    #[test]
    fn test_empty_insert_is_default_values() {
        assert!(Insert::table("users").is_default_values());
    }
}
