//! Query descriptor types.
//!
//! Expressions (`Expr`), scalar values (`Value`), the SELECT descriptor
//! (`Dataset`) and the write / DDL statements derived from it.

pub mod builders;
pub mod cmd;
pub mod ddl;
pub mod expr;
pub mod operators;
pub mod statement;
pub mod values;

pub use self::cmd::{
    ConflictAction, CteDef, Dataset, Delete, Distinct, Insert, Join, JoinCondition, OnConflict,
    RecursiveTerm, Source, TableRef, Update,
};
pub use self::ddl::{
    ColumnDef, CreateSchema, CreateSequence, CreateTable, DropSchema, DropTable, IsolationLevel,
    Transaction,
};
pub use self::expr::{
    Expr, FrameBound, InSet, Interval, OrderTerm, WindowFrame, WindowSpec,
};
pub use self::operators::{
    BinaryOp, CompareOp, IntervalUnit, JoinKind, LockMode, LogicalOp, NullsOrder, SetOp,
    SortOrder,
};
pub use self::statement::Statement;
pub use self::values::Value;
