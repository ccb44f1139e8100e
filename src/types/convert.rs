//! Raw engine cells → typed `Value`s.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use uuid::Uuid;

use crate::ast::Value;
use crate::error::{SqlError, SqlResult};
use crate::types::SchemaType;

/// A result cell as handed back by a connection, before typecasting.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Blob(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    List(Vec<Cell>),
    /// Anything else, rendered as text by the engine
    Other(String),
}

impl Cell {
    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const TIMESTAMPTZ_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
];

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// UBIGINT and HUGEINT values past `i64` become exact decimals, or opaque
/// text beyond the decimal range.
fn wide_integer(n: i128) -> Value {
    if let Ok(small) = i64::try_from(n) {
        return Value::Int(small);
    }
    match Decimal::from_i128(n) {
        Some(d) => Value::Decimal(d),
        None => Value::Opaque {
            type_name: "HUGEINT".to_string(),
            text: n.to_string(),
        },
    }
}

/// Convert a raw cell to the `Value` its column type calls for.
///
/// NULL stays NULL for every type. INTERVAL and unrecognized types come back
/// as `Value::Opaque`.
pub fn typecast(cell: Cell, ty: &SchemaType) -> SqlResult<Value> {
    if matches!(cell, Cell::Null) {
        return Ok(Value::Null);
    }
    let fail = |cell: &Cell| SqlError::conversion(ty.sql_name(), cell.describe());

    match ty {
        SchemaType::Boolean => match &cell {
            Cell::Bool(b) => Ok(Value::Bool(*b)),
            Cell::Int(n) => Ok(Value::Bool(*n != 0)),
            Cell::Text(s) => parse_bool(s).map(Value::Bool).ok_or_else(|| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::Integer => match &cell {
            Cell::Int(n) => Ok(wide_integer(*n)),
            Cell::Bool(b) => Ok(Value::Int(*b as i64)),
            Cell::Text(s) => s.trim().parse().map(Value::Int).map_err(|_| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::Float => match &cell {
            Cell::Float(f) => Ok(Value::Float(*f)),
            Cell::Int(n) => Ok(Value::Float(*n as f64)),
            Cell::Decimal(d) => d
                .to_string()
                .parse()
                .map(Value::Float)
                .map_err(|_| fail(&cell)),
            Cell::Text(s) => s.trim().parse().map(Value::Float).map_err(|_| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::Decimal { .. } => match &cell {
            Cell::Decimal(d) => Ok(Value::Decimal(*d)),
            Cell::Int(n) => Decimal::from_i128(*n)
                .map(Value::Decimal)
                .ok_or_else(|| fail(&cell)),
            Cell::Float(f) => Decimal::from_f64(*f)
                .map(Value::Decimal)
                .ok_or_else(|| fail(&cell)),
            Cell::Text(s) => Decimal::from_str(s.trim())
                .map(Value::Decimal)
                .map_err(|_| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::String { .. } => match cell {
            Cell::Text(s) | Cell::Other(s) => Ok(Value::String(s)),
            Cell::Bool(b) => Ok(Value::String(b.to_string())),
            Cell::Int(n) => Ok(Value::String(n.to_string())),
            Cell::Float(f) => Ok(Value::String(f.to_string())),
            Cell::Decimal(d) => Ok(Value::String(d.to_string())),
            other => Err(fail(&other)),
        },
        SchemaType::Date => match &cell {
            Cell::Date(d) => Ok(Value::Date(*d)),
            Cell::Timestamp(ts) => Ok(Value::Date(ts.date())),
            Cell::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|_| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::Time => match &cell {
            Cell::Time(t) => Ok(Value::Time(*t)),
            Cell::Timestamp(ts) => Ok(Value::time_of(*ts)),
            Cell::Text(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f")
                .map(Value::Time)
                .map_err(|_| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::Timestamp => match &cell {
            Cell::Timestamp(ts) => Ok(Value::Timestamp(*ts)),
            Cell::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(Value::Timestamp)
                .ok_or_else(|| fail(&cell)),
            Cell::Text(s) => parse_timestamp(s.trim())
                .map(Value::Timestamp)
                .ok_or_else(|| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::TimestampTz => match &cell {
            // The engine hands back instants normalized to UTC.
            Cell::Timestamp(ts) => Ok(Value::TimestampTz(ts.and_utc().fixed_offset())),
            Cell::Text(s) => TIMESTAMPTZ_FORMATS
                .iter()
                .find_map(|f| DateTime::parse_from_str(s.trim(), f).ok())
                .map(Value::TimestampTz)
                .ok_or_else(|| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::Blob => match cell {
            Cell::Blob(bytes) => Ok(Value::Blob(bytes)),
            Cell::Text(s) => Ok(Value::Blob(s.into_bytes())),
            other => Err(fail(&other)),
        },
        SchemaType::Uuid => match &cell {
            Cell::Text(s) | Cell::Other(s) => Uuid::parse_str(s.trim())
                .map(Value::Uuid)
                .map_err(|_| fail(&cell)),
            Cell::Blob(b) => Uuid::from_slice(b).map(Value::Uuid).map_err(|_| fail(&cell)),
            Cell::Int(n) => Ok(Value::Uuid(Uuid::from_u128(*n as u128))),
            _ => Err(fail(&cell)),
        },
        SchemaType::Json => match &cell {
            Cell::Text(s) | Cell::Other(s) => serde_json::from_str(s)
                .map(Value::Json)
                .map_err(|_| fail(&cell)),
            _ => Err(fail(&cell)),
        },
        SchemaType::List(inner) => match cell {
            Cell::List(items) => items
                .into_iter()
                .map(|item| typecast(item, inner))
                .collect::<SqlResult<Vec<_>>>()
                .map(Value::List),
            other => Err(fail(&other)),
        },
        SchemaType::Interval | SchemaType::Other(_) => Ok(Value::Opaque {
            type_name: ty.sql_name(),
            text: match cell {
                Cell::Text(s) | Cell::Other(s) => s,
                other => other.describe(),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_type;

    fn cast(cell: Cell, ty: &str) -> SqlResult<Value> {
        typecast(cell, &parse_type(ty).unwrap())
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(cast(Cell::Null, "INTEGER").unwrap(), Value::Null);
        assert_eq!(cast(Cell::Null, "UUID").unwrap(), Value::Null);
    }

    #[test]
    fn test_numeric_casts() {
        assert_eq!(cast(Cell::Int(42), "BIGINT").unwrap(), Value::Int(42));
        assert_eq!(cast(Cell::Text(" 7 ".into()), "INTEGER").unwrap(), Value::Int(7));
        assert_eq!(cast(Cell::Int(2), "DOUBLE").unwrap(), Value::Float(2.0));
        assert_eq!(
            cast(Cell::Text("12.50".into()), "DECIMAL(10,2)").unwrap(),
            Value::Decimal(Decimal::new(1250, 2))
        );
    }

    #[test]
    fn test_unsigned_past_i64_becomes_decimal() {
        assert_eq!(
            cast(Cell::Int(u64::MAX as i128), "UBIGINT").unwrap(),
            Value::Decimal(Decimal::from(u64::MAX))
        );
        assert_eq!(
            cast(Cell::Int(i64::MIN as i128), "BIGINT").unwrap(),
            Value::Int(i64::MIN)
        );
    }

    #[test]
    fn test_hugeint_past_decimal_range_is_opaque() {
        assert_eq!(
            cast(Cell::Int(i128::MAX), "HUGEINT").unwrap(),
            Value::Opaque {
                type_name: "HUGEINT".into(),
                text: i128::MAX.to_string()
            }
        );
    }

    #[test]
    fn test_integer_text_out_of_range_is_conversion_error() {
        let err = cast(Cell::Text("99999999999999999999".into()), "BIGINT").unwrap_err();
        assert!(matches!(err, SqlError::Conversion { .. }));
    }

    #[test]
    fn test_boolean_from_text() {
        assert_eq!(cast(Cell::Text("t".into()), "BOOLEAN").unwrap(), Value::Bool(true));
        assert!(cast(Cell::Text("maybe".into()), "BOOLEAN").is_err());
    }

    #[test]
    fn test_temporal_casts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(cast(Cell::Text("2024-03-09".into()), "DATE").unwrap(), Value::Date(date));

        let ts = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            cast(Cell::Text("2024-03-09 10:30:00".into()), "TIMESTAMP").unwrap(),
            Value::Timestamp(ts)
        );
        assert_eq!(
            cast(Cell::Timestamp(ts), "TIME").unwrap(),
            Value::Time(NaiveTime::from_hms_opt(10, 30, 0).unwrap())
        );

        match cast(Cell::Text("2024-03-09 10:30:00+02:00".into()), "TIMESTAMPTZ").unwrap() {
            Value::TimestampTz(t) => assert_eq!(t.offset().local_minus_utc(), 7200),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_uuid_and_json() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            cast(Cell::Text(id.into()), "UUID").unwrap(),
            Value::Uuid(Uuid::parse_str(id).unwrap())
        );
        assert_eq!(
            cast(Cell::Text(r#"{"a":1}"#.into()), "JSON").unwrap(),
            Value::Json(serde_json::json!({"a": 1}))
        );
    }

    #[test]
    fn test_lists_cast_elementwise() {
        let cell = Cell::List(vec![Cell::Int(1), Cell::Null, Cell::Text("3".into())]);
        assert_eq!(
            cast(cell, "INTEGER[]").unwrap(),
            Value::List(vec![Value::Int(1), Value::Null, Value::Int(3)])
        );
    }

    #[test]
    fn test_unknown_types_are_opaque() {
        assert_eq!(
            cast(Cell::Other("{'a': 1}".into()), "MAP(VARCHAR, INTEGER)").unwrap(),
            Value::Opaque {
                type_name: "MAP(VARCHAR, INTEGER)".into(),
                text: "{'a': 1}".into()
            }
        );
        assert!(matches!(
            cast(Cell::Text("1 day".into()), "INTERVAL").unwrap(),
            Value::Opaque { .. }
        ));
    }
}
