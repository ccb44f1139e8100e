//! Static constructors for datasets and write statements.

use crate::ast::{Dataset, Delete, Insert, Source, TableRef, Update};

impl Dataset {
    /// A dataset with no FROM clause (`SELECT 1`, `SELECT now()`, ...).
    pub fn new() -> Self {
        Self::default()
    }

    /// `SELECT * FROM table`
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            from: vec![Source::table(table)],
            ..Default::default()
        }
    }

    /// A dataset reading from an arbitrary source (subquery, table function).
    pub fn from_source(source: Source) -> Self {
        Self {
            from: vec![source],
            ..Default::default()
        }
    }
}

impl Insert {
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            source: None,
            on_conflict: None,
            returning: Vec::new(),
            primary_key: None,
            sequence: None,
        }
    }
}

impl Update {
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            filter: None,
            returning: Vec::new(),
        }
    }
}

impl Delete {
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            filter: None,
            returning: Vec::new(),
        }
    }
}
