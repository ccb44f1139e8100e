//! DuckDB column types and result-cell conversion.
//!
//! `parser` turns a type name as reported by `information_schema` or
//! `pragma_table_info` into a `SchemaType`; `convert` casts a raw engine
//! cell to a typed `Value` using that schema type.

pub mod convert;
pub mod parser;

use serde::{Deserialize, Serialize};

pub use convert::{typecast, Cell};
pub use parser::parse_type;

/// Schema-level classification of a DuckDB column type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaType {
    Boolean,
    /// Any signed or unsigned integer width
    Integer,
    Float,
    Decimal {
        precision: Option<u8>,
        scale: Option<u8>,
    },
    String {
        length: Option<u32>,
    },
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Blob,
    Uuid,
    Json,
    Interval,
    List(Box<SchemaType>),
    /// MAP, STRUCT, UNION, ENUM, ... kept as written
    Other(String),
}

impl SchemaType {
    /// Canonical DuckDB spelling.
    pub fn sql_name(&self) -> String {
        match self {
            SchemaType::Boolean => "BOOLEAN".to_string(),
            SchemaType::Integer => "BIGINT".to_string(),
            SchemaType::Float => "DOUBLE".to_string(),
            SchemaType::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => format!("DECIMAL({},{})", p, s),
            SchemaType::Decimal {
                precision: Some(p),
                scale: None,
            } => format!("DECIMAL({})", p),
            SchemaType::Decimal { .. } => "DECIMAL".to_string(),
            SchemaType::String { length: Some(n) } => format!("VARCHAR({})", n),
            SchemaType::String { length: None } => "VARCHAR".to_string(),
            SchemaType::Date => "DATE".to_string(),
            SchemaType::Time => "TIME".to_string(),
            SchemaType::Timestamp => "TIMESTAMP".to_string(),
            SchemaType::TimestampTz => "TIMESTAMP WITH TIME ZONE".to_string(),
            SchemaType::Blob => "BLOB".to_string(),
            SchemaType::Uuid => "UUID".to_string(),
            SchemaType::Json => "JSON".to_string(),
            SchemaType::Interval => "INTERVAL".to_string(),
            SchemaType::List(inner) => format!("{}[]", inner.sql_name()),
            SchemaType::Other(name) => name.clone(),
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}
