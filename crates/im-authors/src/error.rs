//! Error types for im-authors
//!
//! The name functions themselves are total; errors only arise at the edges,
//! when rule files, configuration, or catalogs are loaded.

use thiserror::Error;

/// Result type alias for im-authors operations
pub type Result<T> = std::result::Result<T, AuthorsError>;

/// Main error type for im-authors
#[derive(Error, Debug)]
pub enum AuthorsError {
    /// Reading or writing a file failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value could not be serialized to TOML
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A JSON document could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A canonical rule is unusable (blank variant or canonical form)
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// Rule chain loops back on itself
    #[error("Rule cycle detected: {}", .0.join(" -> "))]
    RuleCycle(Vec<String>),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Catalog document does not have the expected shape
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Vocabulary search pattern is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl AuthorsError {
    /// I/O failure at `path`
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        AuthorsError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_chain() {
        let err = AuthorsError::RuleCycle(vec!["A".into(), "B".into(), "A".into()]);
        assert_eq!(err.to_string(), "Rule cycle detected: A -> B -> A");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = AuthorsError::io(
            "missing/rules.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing/rules.toml"));
    }
}
