//! Query descriptors: the dataset (SELECT) tree and the statements derived
//! from it.

use serde::{Deserialize, Serialize};

use crate::ast::{Expr, JoinKind, LockMode, OrderTerm, SetOp};

mod constructors;
mod cte;
mod dml;
mod query;

pub use self::dml::{ConflictAction, Delete, Insert, OnConflict, Update};
pub(crate) use self::query::COMPOUND_ALIAS;

/// The top-level SELECT descriptor.
///
/// Built incrementally with the fluent methods in `query.rs` and rendered
/// as a whole; rendering never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// CTE definitions (WITH / WITH RECURSIVE)
    #[serde(default)]
    pub ctes: Vec<CteDef>,
    /// DISTINCT / DISTINCT ON
    #[serde(default)]
    pub distinct: Distinct,
    /// Select list (empty = *)
    #[serde(default)]
    pub columns: Vec<Expr>,
    /// FROM sources (empty = no FROM clause)
    #[serde(default)]
    pub from: Vec<Source>,
    #[serde(default)]
    pub joins: Vec<Join>,
    /// WHERE predicate
    #[serde(default)]
    pub filter: Option<Expr>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    /// HAVING predicate (filter on aggregates)
    #[serde(default)]
    pub having: Option<Expr>,
    /// QUALIFY predicate (filter on window results)
    #[serde(default)]
    pub qualify: Option<Expr>,
    /// ORDER BY; with set operations it orders the combined result
    #[serde(default)]
    pub order: Vec<OrderTerm>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    /// Set operations (UNION, INTERSECT, EXCEPT) chained queries
    #[serde(default)]
    pub compounds: Vec<(SetOp, Box<Dataset>)>,
    /// Row lock request (FOR UPDATE / FOR SHARE)
    #[serde(default)]
    pub lock: Option<LockMode>,
}

/// DISTINCT mode of a SELECT.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Distinct {
    #[default]
    None,
    All,
    On(Vec<Expr>),
}

/// A table reference, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema.into()),
        }
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        TableRef::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        TableRef::new(name)
    }
}

/// A FROM / JOIN source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// Table (or CTE name)
    Table {
        table: TableRef,
        #[serde(default)]
        alias: Option<String>,
    },
    /// (SELECT ...) AS alias
    Subquery { query: Box<Dataset>, alias: String },
    /// Table function, e.g. read_parquet('x.parquet')
    Function {
        call: Expr,
        #[serde(default)]
        alias: Option<String>,
    },
}

impl Source {
    pub fn table(name: impl Into<TableRef>) -> Self {
        Source::Table {
            table: name.into(),
            alias: None,
        }
    }

    /// Attach or replace the alias of this source.
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Source::Table { table, .. } => Source::Table {
                table,
                alias: Some(alias.into()),
            },
            Source::Subquery { query, .. } => Source::Subquery {
                query,
                alias: alias.into(),
            },
            Source::Function { call, .. } => Source::Function {
                call,
                alias: Some(alias.into()),
            },
        }
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Source::table(name)
    }
}

impl From<TableRef> for Source {
    fn from(table: TableRef) -> Self {
        Source::Table { table, alias: None }
    }
}

/// A join definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub source: Source,
    pub condition: JoinCondition,
}

/// How a join matches rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinCondition {
    /// CROSS / NATURAL joins
    None,
    On(Expr),
    /// USING (col, ...) with bare column names
    Using(Vec<String>),
}

/// CTE (Common Table Expression) definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CteDef {
    /// CTE name (the alias used in the query)
    pub name: String,
    /// Column list for the CTE (optional)
    #[serde(default)]
    pub columns: Vec<String>,
    /// Base query (non-recursive part)
    pub query: Box<Dataset>,
    /// Recursive part, joined to the base with UNION [ALL]
    #[serde(default)]
    pub recursive: Option<RecursiveTerm>,
}

/// The self-referencing half of a recursive CTE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecursiveTerm {
    pub query: Box<Dataset>,
    /// UNION ALL (true) or UNION (false)
    pub union_all: bool,
}

impl CteDef {
    pub fn is_recursive(&self) -> bool {
        self.recursive.is_some()
    }
}
