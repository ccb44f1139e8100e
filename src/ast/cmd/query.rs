//! Fluent builder methods for `Dataset`.
//!
//! Every method consumes and returns the dataset, so a query reads as one
//! chain: `Dataset::table("users").filter(eq("active", true)).limit(10)`.

use crate::ast::{
    Dataset, Delete, Distinct, Expr, Join, JoinCondition, JoinKind, LockMode, LogicalOp,
    OrderTerm, SetOp, Source, TableRef, Update,
};
use crate::error::{SqlError, SqlResult};

/// Alias given to a dataset wrapped as a subquery for a set operation.
pub(crate) const COMPOUND_ALIAS: &str = "t1";

/// AND a new predicate onto an optional existing one, flattening nested ANDs.
pub(crate) fn conjoin(existing: Option<Expr>, predicate: Expr) -> Expr {
    match existing {
        None => predicate,
        Some(Expr::Logical {
            op: LogicalOp::And,
            mut operands,
        }) => {
            operands.push(predicate);
            Expr::Logical {
                op: LogicalOp::And,
                operands,
            }
        }
        Some(other) => Expr::Logical {
            op: LogicalOp::And,
            operands: vec![other, predicate],
        },
    }
}

impl Dataset {
    /// Replace the select list.
    pub fn select<I, E>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one expression to the select list.
    pub fn select_expr(mut self, expr: impl Into<Expr>) -> Self {
        self.columns.push(expr.into());
        self
    }

    /// Select bare columns by name.
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns
            .extend(names.into_iter().map(|n| Expr::Column(n.as_ref().to_string())));
        self
    }

    /// Add another FROM source (comma join).
    pub fn from(mut self, source: impl Into<Source>) -> Self {
        self.from.push(source.into());
        self
    }

    /// Alias the first FROM source.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        if let Some(first) = self.from.first_mut() {
            let source = first.clone().alias(alias);
            *first = source;
        }
        self
    }

    /// Add a WHERE predicate. Repeated calls AND together.
    pub fn filter(mut self, predicate: impl Into<Expr>) -> Self {
        self.filter = Some(conjoin(self.filter.take(), predicate.into()));
        self
    }

    /// Add the complement of a predicate to WHERE.
    pub fn exclude(self, predicate: impl Into<Expr>) -> Self {
        self.filter(predicate.into().invert())
    }

    /// OR a predicate onto the current WHERE clause.
    pub fn or_filter(mut self, predicate: impl Into<Expr>) -> Self {
        let predicate = predicate.into();
        self.filter = Some(match self.filter.take() {
            None => predicate,
            Some(Expr::Logical {
                op: LogicalOp::Or,
                mut operands,
            }) => {
                operands.push(predicate);
                Expr::Logical {
                    op: LogicalOp::Or,
                    operands,
                }
            }
            Some(other) => Expr::Logical {
                op: LogicalOp::Or,
                operands: vec![other, predicate],
            },
        });
        self
    }

    /// Remove the WHERE clause.
    pub fn unfiltered(mut self) -> Self {
        self.filter = None;
        self
    }

    /// Add a join with an ON condition.
    pub fn join(mut self, kind: JoinKind, source: impl Into<Source>, on: impl Into<Expr>) -> Self {
        self.joins.push(Join {
            kind,
            source: source.into(),
            condition: JoinCondition::On(on.into()),
        });
        self
    }

    pub fn inner_join(self, source: impl Into<Source>, on: impl Into<Expr>) -> Self {
        self.join(JoinKind::Inner, source, on)
    }

    pub fn left_join(self, source: impl Into<Source>, on: impl Into<Expr>) -> Self {
        self.join(JoinKind::Left, source, on)
    }

    pub fn right_join(self, source: impl Into<Source>, on: impl Into<Expr>) -> Self {
        self.join(JoinKind::Right, source, on)
    }

    pub fn full_join(self, source: impl Into<Source>, on: impl Into<Expr>) -> Self {
        self.join(JoinKind::Full, source, on)
    }

    /// Add a join matched by USING (columns).
    pub fn join_using<I, S>(mut self, kind: JoinKind, source: impl Into<Source>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.joins.push(Join {
            kind,
            source: source.into(),
            condition: JoinCondition::Using(columns.into_iter().map(Into::into).collect()),
        });
        self
    }

    pub fn cross_join(mut self, source: impl Into<Source>) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Cross,
            source: source.into(),
            condition: JoinCondition::None,
        });
        self
    }

    pub fn natural_join(mut self, source: impl Into<Source>) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Natural,
            source: source.into(),
            condition: JoinCondition::None,
        });
        self
    }

    pub fn group_by<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.group_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Add a HAVING predicate. Repeated calls AND together.
    pub fn having(mut self, predicate: impl Into<Expr>) -> Self {
        self.having = Some(conjoin(self.having.take(), predicate.into()));
        self
    }

    /// Add a QUALIFY predicate. Repeated calls AND together.
    pub fn qualify(mut self, predicate: impl Into<Expr>) -> Self {
        self.qualify = Some(conjoin(self.qualify.take(), predicate.into()));
        self
    }

    pub fn order_by(mut self, term: impl Into<OrderTerm>) -> Self {
        self.order.push(term.into());
        self
    }

    pub fn order_asc(self, column: &str) -> Self {
        self.order_by(OrderTerm::asc(Expr::Column(column.to_string())))
    }

    pub fn order_desc(self, column: &str) -> Self {
        self.order_by(OrderTerm::desc(Expr::Column(column.to_string())))
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// SELECT DISTINCT
    pub fn distinct(mut self) -> Self {
        self.distinct = Distinct::All;
        self
    }

    /// SELECT DISTINCT ON (exprs)
    pub fn distinct_on<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.distinct = Distinct::On(exprs.into_iter().map(Into::into).collect());
        self
    }

    pub fn union(self, other: Dataset) -> Self {
        self.compound(SetOp::Union, other)
    }

    pub fn union_all(self, other: Dataset) -> Self {
        self.compound(SetOp::UnionAll, other)
    }

    pub fn intersect(self, other: Dataset) -> Self {
        self.compound(SetOp::Intersect, other)
    }

    pub fn except(self, other: Dataset) -> Self {
        self.compound(SetOp::Except, other)
    }

    /// Append a set operation.
    ///
    /// ORDER BY / LIMIT / OFFSET on a compound dataset apply to the whole
    /// result, so a left side that already carries them, or earlier set
    /// operations, is first wrapped as `SELECT * FROM (...) AS t1`.
    fn compound(self, op: SetOp, other: Dataset) -> Self {
        let mut left = if self.has_result_modifiers() || !self.compounds.is_empty() {
            Dataset::from_source(self.as_source(COMPOUND_ALIAS))
        } else {
            self
        };
        left.compounds.push((op, Box::new(other)));
        left
    }

    fn has_result_modifiers(&self) -> bool {
        !self.order.is_empty() || self.limit.is_some() || self.offset.is_some()
    }

    /// Whether this dataset must be parenthesized as a set-operation operand.
    pub(crate) fn needs_grouping(&self) -> bool {
        self.has_result_modifiers()
            || !self.ctes.is_empty()
            || !self.compounds.is_empty()
            || self.lock.is_some()
    }

    /// Request a FOR UPDATE row lock.
    pub fn for_update(mut self) -> Self {
        self.lock = Some(LockMode::Update);
        self
    }

    /// Request a FOR SHARE row lock.
    pub fn for_share(mut self) -> Self {
        self.lock = Some(LockMode::Share);
        self
    }

    /// Wrap this dataset as an aliased subquery source.
    pub fn as_source(self, alias: impl Into<String>) -> Source {
        Source::Subquery {
            query: Box::new(self),
            alias: alias.into(),
        }
    }

    /// The single table this dataset reads, if it reads exactly one table
    /// and joins nothing.
    fn target_table(&self, statement: &str) -> SqlResult<TableRef> {
        match (self.from.as_slice(), self.joins.is_empty()) {
            ([Source::Table { table, .. }], true) => Ok(table.clone()),
            _ => Err(SqlError::invalid(format!(
                "{} requires a dataset over exactly one table without joins",
                statement
            ))),
        }
    }

    /// Derive an UPDATE of this dataset's table, keeping its filter.
    pub fn update<I, S, E>(&self, assignments: I) -> SqlResult<Update>
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<String>,
        E: Into<Expr>,
    {
        let mut update = Update::table(self.target_table("UPDATE")?);
        update.assignments = assignments
            .into_iter()
            .map(|(c, e)| (c.into(), e.into()))
            .collect();
        update.filter = self.filter.clone();
        Ok(update)
    }

    /// Derive a DELETE of this dataset's rows.
    pub fn delete(&self) -> SqlResult<Delete> {
        let mut delete = Delete::table(self.target_table("DELETE")?);
        delete.filter = self.filter.clone();
        Ok(delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, Value};

    fn eq(column: &str, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            left: Box::new(Expr::Column(column.to_string())),
            op: CompareOp::Eq,
            right: Box::new(Expr::Literal(value.into())),
        }
    }

    #[test]
    fn test_filters_flatten_into_one_and() {
        let ds = Dataset::table("users")
            .filter(eq("a", 1))
            .filter(eq("b", 2))
            .filter(eq("c", 3));
        match ds.filter {
            Some(Expr::Logical { op, operands }) => {
                assert_eq!(op, LogicalOp::And);
                assert_eq!(operands.len(), 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_exclude_inverts() {
        let ds = Dataset::table("users").exclude(eq("a", 1));
        assert!(matches!(
            ds.filter,
            Some(Expr::Compare { op: CompareOp::Ne, .. })
        ));
    }

    #[test]
    fn test_update_keeps_filter() {
        let update = Dataset::table("users")
            .filter(eq("id", 7))
            .update([("name", Expr::from("x"))])
            .unwrap();
        assert_eq!(update.table.name, "users");
        assert_eq!(update.filter, Some(eq("id", 7)));
    }

    #[test]
    fn test_delete_rejects_joined_dataset() {
        let ds = Dataset::table("a").inner_join("b", eq("x", 1));
        assert!(matches!(ds.delete(), Err(SqlError::InvalidOptions(_))));
    }
}
