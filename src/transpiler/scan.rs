//! File paths → table-function call (`read_parquet`, `read_csv`, `read_json`).

use std::path::Path;

use crate::ast::{Dataset, Expr, Source, Value};
use crate::error::{SqlError, SqlResult};
use crate::transpiler::traits::DialectCompiler;

/// File formats with a bulk reader function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Parquet,
    Csv,
    Json,
}

/// Compression suffixes the readers accept transparently.
const COMPRESSION_SUFFIXES: &[&str] = &["gz", "zst"];

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "parquet" => Some(FileFormat::Parquet),
            "csv" | "tsv" => Some(FileFormat::Csv),
            "json" | "ndjson" | "jsonl" => Some(FileFormat::Json),
            _ => None,
        }
    }

    /// Detect the format of a path, looking through `.gz` / `.zst`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if COMPRESSION_SUFFIXES.contains(&ext.to_ascii_lowercase().as_str()) {
            return Self::from_path(Path::new(path.file_stem()?));
        }
        Self::from_extension(ext)
    }
}

/// Build the reader call for one or more files of the same format.
///
/// One path is passed as a string, several as a list literal.
pub fn file_scan<I, P>(paths: I, c: &dyn DialectCompiler) -> SqlResult<Expr>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut format = None;
    let mut args = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let detected = FileFormat::from_path(path).ok_or_else(|| {
            SqlError::invalid(format!("unrecognized file type: {}", path.display()))
        })?;
        match format {
            None => format = Some(detected),
            Some(f) if f != detected => {
                return Err(SqlError::invalid(format!(
                    "cannot scan {:?} and {:?} files together",
                    f, detected
                )));
            }
            Some(_) => {}
        }
        args.push(Value::String(path.to_string_lossy().into_owned()));
    }

    let Some(format) = format else {
        return Err(SqlError::invalid("file scan requires at least one path"));
    };
    let name = c
        .scan_function(format)
        .ok_or_else(|| SqlError::unsupported(format!("{:?} file scans", format), c.name()))?;

    let arg = if args.len() == 1 {
        Expr::Literal(args.remove(0))
    } else {
        Expr::Literal(Value::List(args))
    };
    Ok(Expr::Function {
        name: name.to_string(),
        args: vec![arg],
        distinct: false,
    })
}

/// `SELECT * FROM read_xxx(...)`
pub fn file_dataset<I, P>(paths: I, c: &dyn DialectCompiler) -> SqlResult<Dataset>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Ok(Dataset::from_source(Source::Function {
        call: file_scan(paths, c)?,
        alias: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ToSql;
    use crate::transpiler::sql::duckdb::DuckDbCompiler;

    #[test]
    fn test_single_parquet() {
        let c = DuckDbCompiler::default();
        let sql = file_dataset(["data/events.parquet"], &c).unwrap().to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM read_parquet('data/events.parquet')");
    }

    #[test]
    fn test_many_csv_as_list() {
        let c = DuckDbCompiler::default();
        let call = file_scan(["a.csv", "b.TSV", "c.csv.gz"], &c).unwrap();
        let sql = call.to_sql().unwrap();
        assert_eq!(sql, "read_csv(['a.csv', 'b.TSV', 'c.csv.gz'])");
    }

    #[test]
    fn test_json_variants() {
        assert_eq!(FileFormat::from_extension("jsonl"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("NDJSON"), Some(FileFormat::Json));
    }

    #[test]
    fn test_mixed_extensions_rejected() {
        let c = DuckDbCompiler::default();
        let err = file_scan(["a.csv", "b.parquet"], &c).unwrap_err();
        assert!(matches!(err, SqlError::InvalidOptions(_)));
        let err = file_scan(["notes.txt"], &c).unwrap_err();
        assert!(matches!(err, SqlError::InvalidOptions(_)));
        let err = file_scan(Vec::<&str>::new(), &c).unwrap_err();
        assert!(matches!(err, SqlError::InvalidOptions(_)));
    }
}
