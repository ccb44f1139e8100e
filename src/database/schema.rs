//! Table metadata read back from the engine.

use serde::{Deserialize, Serialize};

use crate::ast::Value;
use crate::types::SchemaType;

/// One column as reported by `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Type name exactly as DuckDB spells it
    pub db_type: String,
    pub schema_type: SchemaType,
    pub allow_null: bool,
    /// Default expression text, if any
    pub default: Option<String>,
    pub primary_key: bool,
}

/// A typed result row. Column order follows the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> std::collections::HashMap<String, Value> {
        self.columns.into_iter().zip(self.values).collect()
    }
}
