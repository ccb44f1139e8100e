//! CTE builder methods for `Dataset`.

use crate::ast::{CteDef, Dataset, RecursiveTerm};

impl Dataset {
    /// Add a named CTE: `WITH name AS (query)`.
    pub fn with(mut self, name: impl Into<String>, query: Dataset) -> Self {
        self.ctes.push(CteDef {
            name: name.into(),
            columns: Vec::new(),
            query: Box::new(query),
            recursive: None,
        });
        self
    }

    /// Add a recursive CTE: `name(columns) AS (base UNION [ALL] step)`.
    ///
    /// One recursive definition turns the whole clause into WITH RECURSIVE.
    pub fn with_recursive<I, S>(
        mut self,
        name: impl Into<String>,
        columns: I,
        base: Dataset,
        step: Dataset,
        union_all: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctes.push(CteDef {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            query: Box::new(base),
            recursive: Some(RecursiveTerm {
                query: Box::new(step),
                union_all,
            }),
        });
        self
    }

    /// Set the column list of the most recently added CTE.
    pub fn cte_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(cte) = self.ctes.last_mut() {
            cte.columns = columns.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn has_recursive_cte(&self) -> bool {
        self.ctes.iter().any(CteDef::is_recursive)
    }
}
