//! `[duckdb]` section of `qail.toml`.
//!
//! ```toml
//! [duckdb]
//! path = "analytics.duckdb"
//!
//! [duckdb.dialect]
//! quote_identifiers = true
//! ilike = "upper_like"
//! timestamp_precision = "microseconds"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SqlError, SqlResult};
use crate::transpiler::DialectPolicy;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "QAIL_DUCKDB_CONFIG";
const CONFIG_FILE: &str = "qail.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckDbConfig {
    /// Database file; unset or `:memory:` for an in-memory database
    pub path: Option<String>,
    pub dialect: DialectPolicy,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    duckdb: DuckDbConfig,
}

impl DuckDbConfig {
    /// Parse the `[duckdb]` table out of a full `qail.toml` document.
    /// Other tables are ignored.
    pub fn from_toml_str(content: &str) -> SqlResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.duckdb)
    }

    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| SqlError::Config(format!("{}: {}", path.display(), e)))?;
        let config = file.duckdb;
        tracing::info!("Loaded DuckDB config from {}", path.display());
        Ok(config)
    }

    /// Find and load the config file.
    ///
    /// Order: `explicit`, `$QAIL_DUCKDB_CONFIG`, `./qail.toml`,
    /// `<config dir>/qail/qail.toml`. Defaults when none exists. An explicit
    /// or env path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>) -> SqlResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(path);
        }
        match candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No {} found, using default DuckDB config", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self.path.as_deref(), None | Some(":memory:"))
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("qail").join(CONFIG_FILE));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::dialect::{IdentifierCase, IlikeStrategy, TimestampPrecision};

    #[test]
    fn test_full_section() {
        let config = DuckDbConfig::from_toml_str(
            r#"
[postgres]
url = "postgres://localhost/app"

[duckdb]
path = "analytics.duckdb"

[duckdb.dialect]
quote_identifiers = false
identifier_case = "lower"
ilike = "native"
like_escape = "\\"
timestamp_precision = "microseconds"
"#,
        )
        .unwrap();

        assert_eq!(config.path.as_deref(), Some("analytics.duckdb"));
        assert!(!config.is_in_memory());
        assert!(!config.dialect.quote_identifiers);
        assert_eq!(config.dialect.identifier_case, IdentifierCase::Lower);
        assert_eq!(config.dialect.ilike, IlikeStrategy::Native);
        assert_eq!(config.dialect.like_escape, Some('\\'));
        assert_eq!(
            config.dialect.timestamp_precision,
            TimestampPrecision::Microseconds
        );
        // untouched fields keep their defaults
        assert!(!config.dialect.supports_returning);
        assert!(config.dialect.supports_qualify);
    }

    #[test]
    fn test_missing_section_is_default() {
        let config = DuckDbConfig::from_toml_str("[postgres]\nurl = \"x\"\n").unwrap();
        assert_eq!(config, DuckDbConfig::default());
        assert!(config.is_in_memory());
        assert_eq!(config.dialect, DialectPolicy::duckdb());
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = DuckDbConfig::from_toml_str("[duckdb.dialect]\nilike = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, SqlError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let err = DuckDbConfig::discover(Some(Path::new("/nonexistent/qail.toml"))).unwrap_err();
        assert!(matches!(err, SqlError::Io(_)));
    }
}
