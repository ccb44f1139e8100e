use serde::{Deserialize, Serialize};

use crate::ast::{
    CreateSchema, CreateSequence, CreateTable, Dataset, Delete, DropSchema, DropTable, Insert,
    Transaction, Update,
};

/// Any statement the compiler can render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(Dataset),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    CreateSchema(CreateSchema),
    DropSchema(DropSchema),
    CreateTable(CreateTable),
    DropTable(DropTable),
    CreateSequence(CreateSequence),
    Transaction(Transaction),
}

macro_rules! impl_from_statement {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Statement {
                fn from(v: $variant) -> Self {
                    Statement::$variant(v)
                }
            }
        )*
    };
}

impl_from_statement!(
    Insert,
    Update,
    Delete,
    CreateSchema,
    DropSchema,
    CreateTable,
    DropTable,
    CreateSequence,
    Transaction,
);

impl From<Dataset> for Statement {
    fn from(ds: Dataset) -> Self {
        Statement::Select(ds)
    }
}
