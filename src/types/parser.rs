//! nom parser for DuckDB type names.
//!
//! Accepts multi-word names (`TIMESTAMP WITH TIME ZONE`, `DOUBLE PRECISION`),
//! a parenthesized argument list (`DECIMAL(18,3)`, `STRUCT(a INTEGER)`) and
//! any number of `[]` list suffixes.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::opt,
    multi::{many0, separated_list1},
    sequence::{delimited, preceded},
};

use crate::error::{SqlError, SqlResult};
use crate::types::SchemaType;

/// One word of a type name.
fn parse_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

/// Text up to the `)` closing the current nesting level.
fn parse_balanced(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok((&input[i..], &input[..i])),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn parse_arguments(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, delimited(char('('), parse_balanced, char(')'))).parse(input)
}

fn parse_list_suffix(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        delimited(char('['), take_while(|c: char| c.is_ascii_digit()), char(']')),
    )
    .parse(input)
}

type RawType<'a> = (Vec<&'a str>, Option<&'a str>, Vec<&'a str>);

fn parse_raw_type(input: &str) -> IResult<&str, RawType<'_>> {
    (
        preceded(multispace0, separated_list1(multispace1, parse_word)),
        opt(parse_arguments),
        many0(parse_list_suffix),
    )
        .parse(input)
}

fn parse_numbers(args: &str) -> Vec<Option<u32>> {
    args.split(',').map(|a| a.trim().parse().ok()).collect()
}

fn classify(words: &[&str], args: Option<&str>, original: &str) -> SqlResult<SchemaType> {
    let name = words
        .iter()
        .map(|w| w.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(match name.as_str() {
        "BOOLEAN" | "BOOL" | "LOGICAL" => SchemaType::Boolean,
        "TINYINT" | "SMALLINT" | "INTEGER" | "INT" | "BIGINT" | "HUGEINT" | "UTINYINT"
        | "USMALLINT" | "UINTEGER" | "UBIGINT" | "UHUGEINT" | "INT1" | "INT2" | "INT4"
        | "INT8" | "SHORT" | "LONG" | "SIGNED" => SchemaType::Integer,
        "REAL" | "FLOAT" | "FLOAT4" | "FLOAT8" | "DOUBLE" | "DOUBLE PRECISION" => {
            SchemaType::Float
        }
        "DECIMAL" | "NUMERIC" => {
            let nums = args.map(parse_numbers).unwrap_or_default();
            let as_u8 = |n: Option<&Option<u32>>| n.copied().flatten().and_then(|v| u8::try_from(v).ok());
            SchemaType::Decimal {
                precision: as_u8(nums.first()),
                scale: as_u8(nums.get(1)),
            }
        }
        "VARCHAR" | "TEXT" | "STRING" | "CHAR" | "BPCHAR" | "CHARACTER"
        | "CHARACTER VARYING" => SchemaType::String {
            length: args.and_then(|a| a.trim().parse().ok()),
        },
        "DATE" => SchemaType::Date,
        "TIME" | "TIMETZ" | "TIME WITH TIME ZONE" | "TIME WITHOUT TIME ZONE" => SchemaType::Time,
        "TIMESTAMP" | "DATETIME" | "TIMESTAMP_S" | "TIMESTAMP_MS" | "TIMESTAMP_NS"
        | "TIMESTAMP WITHOUT TIME ZONE" => SchemaType::Timestamp,
        "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => SchemaType::TimestampTz,
        "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" => SchemaType::Blob,
        "UUID" => SchemaType::Uuid,
        "JSON" => SchemaType::Json,
        "INTERVAL" => SchemaType::Interval,
        "LIST" => match args {
            Some(inner) => SchemaType::List(Box::new(parse_type(inner)?)),
            None => SchemaType::Other(original.trim().to_string()),
        },
        _ => SchemaType::Other(original.trim().to_string()),
    })
}

/// Parse a DuckDB type name.
pub fn parse_type(text: &str) -> SqlResult<SchemaType> {
    let (rest, (words, args, suffixes)) = parse_raw_type(text).map_err(|e| {
        let remaining = match &e {
            nom::Err::Error(err) | nom::Err::Failure(err) => err.input,
            nom::Err::Incomplete(_) => "",
        };
        SqlError::TypeParse {
            position: text.len() - remaining.len(),
            message: format!("expected a type name in {:?}", text),
        }
    })?;
    if !rest.trim().is_empty() {
        return Err(SqlError::TypeParse {
            position: text.len() - rest.len(),
            message: format!("unexpected {:?}", rest.trim()),
        });
    }

    let base_text = match suffixes.len() {
        0 => text,
        _ => text.split('[').next().unwrap_or(text),
    };
    let mut ty = classify(&words, args, base_text)?;
    for _ in suffixes {
        ty = SchemaType::List(Box::new(ty));
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_names() {
        assert_eq!(parse_type("INTEGER").unwrap(), SchemaType::Integer);
        assert_eq!(parse_type("bigint").unwrap(), SchemaType::Integer);
        assert_eq!(parse_type("DOUBLE PRECISION").unwrap(), SchemaType::Float);
        assert_eq!(parse_type("BOOLEAN").unwrap(), SchemaType::Boolean);
        assert_eq!(parse_type("UUID").unwrap(), SchemaType::Uuid);
    }

    #[test]
    fn test_multi_word_timestamps() {
        assert_eq!(
            parse_type("TIMESTAMP WITH TIME ZONE").unwrap(),
            SchemaType::TimestampTz
        );
        assert_eq!(parse_type("timestamp").unwrap(), SchemaType::Timestamp);
    }

    #[test]
    fn test_arguments() {
        assert_eq!(
            parse_type("DECIMAL(18,3)").unwrap(),
            SchemaType::Decimal {
                precision: Some(18),
                scale: Some(3)
            }
        );
        assert_eq!(
            parse_type("VARCHAR(255)").unwrap(),
            SchemaType::String { length: Some(255) }
        );
    }

    #[test]
    fn test_list_suffixes() {
        assert_eq!(
            parse_type("INTEGER[]").unwrap(),
            SchemaType::List(Box::new(SchemaType::Integer))
        );
        assert_eq!(
            parse_type("VARCHAR[][]").unwrap(),
            SchemaType::List(Box::new(SchemaType::List(Box::new(SchemaType::String {
                length: None
            }))))
        );
    }

    #[test]
    fn test_nested_other_types_kept_verbatim() {
        assert_eq!(
            parse_type("STRUCT(a INTEGER, b MAP(VARCHAR, INTEGER))").unwrap(),
            SchemaType::Other("STRUCT(a INTEGER, b MAP(VARCHAR, INTEGER))".into())
        );
    }

    #[test]
    fn test_errors_report_position() {
        match parse_type("DECIMAL(18,3") {
            Err(SqlError::TypeParse { position, .. }) => assert_eq!(position, 7),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(parse_type(""), Err(SqlError::TypeParse { .. })));
    }
}
