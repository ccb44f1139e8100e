//! Scalar value → SQL literal text.

use crate::ast::Value;
use crate::error::{SqlError, SqlResult};
use crate::transpiler::traits::DialectCompiler;

/// Single-quote a string, doubling embedded quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Shortest round-trip rendering; always contains `.` or an exponent.
pub fn render_float(f: f64) -> SqlResult<String> {
    if !f.is_finite() {
        return Err(SqlError::UnsupportedValue(format!("non-finite float {}", f)));
    }
    Ok(format!("{:?}", f))
}

/// Render a value as a literal for the given dialect.
pub fn render_value(value: &Value, compiler: &dyn DialectCompiler) -> SqlResult<String> {
    Ok(match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => compiler.bool_literal(*b),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => render_float(*f)?,
        Value::Decimal(d) => d.to_string(),
        Value::String(s) => quote_string(s),
        Value::Blob(bytes) => compiler.blob_literal(bytes),
        Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        Value::Time(t) => format!("'{}'", t.format("%H:%M:%S")),
        Value::Timestamp(ts) => format!("'{}'", ts.format(compiler.timestamp_format())),
        Value::TimestampTz(ts) => {
            format!("'{}{}'", ts.format(compiler.timestamp_format()), ts.format("%:z"))
        }
        Value::Uuid(u) => format!("'{}'", u.hyphenated()),
        Value::Json(j) => {
            let text = serde_json::to_string(j)
                .map_err(|e| SqlError::UnsupportedValue(format!("json: {}", e)))?;
            quote_string(&text)
        }
        Value::List(items) => {
            let rendered = items
                .iter()
                .map(|v| render_value(v, compiler))
                .collect::<SqlResult<Vec<_>>>()?;
            format!("[{}]", rendered.join(", "))
        }
        Value::Opaque { type_name, .. } => {
            return Err(SqlError::UnsupportedValue(type_name.clone()));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::dialect::{DialectPolicy, TimestampPrecision};
    use crate::transpiler::sql::duckdb::DuckDbCompiler;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn lit(v: impl Into<Value>) -> String {
        render_value(&v.into(), &DuckDbCompiler::default()).unwrap()
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(lit("John's Name"), "'John''s Name'");
        assert_eq!(lit(""), "''");
        assert_eq!(lit("héllo ☃"), "'héllo ☃'");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lit(-42i64), "-42");
        assert_eq!(lit(1.0f64), "1.0");
        assert_eq!(lit(0.1f64), "0.1");
        assert_eq!(lit(-2.5f64), "-2.5");
        assert!(render_float(f64::NAN).is_err());
        assert!(render_float(f64::INFINITY).is_err());
    }

    #[test]
    fn test_temporal() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_micro_opt(13, 4, 5, 250_000)
            .unwrap();
        assert_eq!(lit(ts.date()), "'2024-01-31'");
        assert_eq!(lit(ts), "'2024-01-31 13:04:05'");
        assert_eq!(lit(Value::time_of(ts)), "'13:04:05'");

        let micros = DuckDbCompiler::new(
            DialectPolicy::duckdb().with_timestamp_precision(TimestampPrecision::Microseconds),
        );
        assert_eq!(
            render_value(&ts.into(), &micros).unwrap(),
            "'2024-01-31 13:04:05.250000'"
        );

        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let zoned = tz.from_local_datetime(&ts).unwrap();
        assert_eq!(lit(zoned), "'2024-01-31 13:04:05+02:00'");
    }

    #[test]
    fn test_blob_hex() {
        assert_eq!(lit(vec![0xFFu8, 0xFE, 0xFD]), "'fffefd'");
        assert_eq!(lit(vec![0u8, 1, 2, 3]), "'00010203'");
    }

    #[test]
    fn test_every_quote_is_doubled() {
        let fillers = ["", "a", "John", "héllo ☃", "%_\\", "\n"];
        for quotes in 0..8 {
            for filler in fillers {
                let text: String = (0..quotes).map(|_| format!("{}'", filler)).collect::<String>() + filler;
                let out = quote_string(&text);
                assert_eq!(out.len(), text.len() + quotes + 2, "{:?}", text);
                assert_eq!(out.matches('\'').count(), 2 * quotes + 2);
                assert_eq!(out[1..out.len() - 1].replace("''", "'"), text);
            }
        }
    }

    #[test]
    fn test_every_blob_is_lowercase_hex() {
        for len in 0..64usize {
            let bytes: Vec<u8> = (0..len).map(|i| ((i * 37 + len * 11) % 256) as u8).collect();
            let out = lit(bytes.clone());
            assert_eq!(out.len(), 2 * len + 2);
            let inner = &out[1..out.len() - 1];
            assert!(!inner.starts_with("0x") && !inner.starts_with("\\x"));
            assert!(inner.chars().all(|ch| matches!(ch, '0'..='9' | 'a'..='f')), "{}", inner);
            assert_eq!(hex::decode(inner).unwrap(), bytes);
        }
    }

    #[test]
    fn test_booleans_are_keywords() {
        for b in [true, false] {
            let out = lit(b);
            assert!(out == "TRUE" || out == "FALSE");
            assert_eq!(out == "TRUE", b);
        }
    }

    #[test]
    fn test_list_and_json() {
        assert_eq!(lit(Value::List(vec![1.into(), "a".into()])), "[1, 'a']");
        assert_eq!(lit(serde_json::json!({"k": "it's"})), "'{\"k\":\"it''s\"}'");
    }

    #[test]
    fn test_opaque_rejected() {
        let v = Value::Opaque {
            type_name: "MAP(VARCHAR, INTEGER)".into(),
            text: "{a=1}".into(),
        };
        let err = render_value(&v, &DuckDbCompiler::default()).unwrap_err();
        assert!(matches!(err, SqlError::UnsupportedValue(t) if t.contains("MAP")));
    }
}
