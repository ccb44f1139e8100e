//! Error types for the DuckDB adapter.

use thiserror::Error;

/// The main error type for compiling and executing DuckDB statements.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A value has no literal rendering in the dialect.
    #[error("Unsupported value type: {0}")]
    UnsupportedValue(String),

    /// Mutually exclusive or structurally invalid descriptor options.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The dialect cannot express the requested clause or feature.
    #[error("{feature} is not supported by {dialect}")]
    Unsupported {
        feature: String,
        dialect: &'static str,
    },

    /// A DuckDB type name could not be parsed.
    #[error("Type parse error at position {position}: {message}")]
    TypeParse { position: usize, message: String },

    /// A result cell could not be converted to its column type.
    #[error("Cannot convert {value} to {type_name}")]
    Conversion { type_name: String, value: String },

    /// Error reported by the database engine.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqlError {
    /// Create an unsupported-feature error for the given dialect.
    pub fn unsupported(feature: impl Into<String>, dialect: &'static str) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            dialect,
        }
    }

    /// Create an invalid-options error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }

    /// Create a conversion error.
    pub fn conversion(type_name: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self::Conversion {
            type_name: type_name.into(),
            value: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for adapter operations.
pub type SqlResult<T> = Result<T, SqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SqlError::unsupported("RETURNING", "DuckDB");
        assert_eq!(err.to_string(), "RETURNING is not supported by DuckDB");

        let err = SqlError::invalid("cannot combine IF NOT EXISTS with OR REPLACE");
        assert_eq!(
            err.to_string(),
            "Invalid options: cannot combine IF NOT EXISTS with OR REPLACE"
        );
    }

    #[test]
    fn test_conversion_display() {
        let err = SqlError::conversion("INTEGER", "'abc'");
        assert_eq!(err.to_string(), "Cannot convert 'abc' to INTEGER");
    }
}
