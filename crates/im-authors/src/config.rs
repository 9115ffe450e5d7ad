//! Configuration for im-authors
//!
//! Centralized settings for which catalog fields hold person names and for
//! the thresholds of the corruption, reconstruction, and duplicate-scan
//! heuristics. Every section has defaults, so a config file only needs the
//! values it changes.
//!
//! ```toml
//! fields = ["autores_colaboradores", "autores_citados"]
//!
//! [corruption]
//! threshold = 0.7
//! min_list_len = 2
//!
//! [scan]
//! similarity_threshold = 0.9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corruption::CorruptionPolicy;
use crate::error::{AuthorsError, Result};
use crate::reconstruct::ReconstructOptions;
use crate::similarity::ScanOptions;

/// Author-bearing fields of the catalog records
pub const DEFAULT_FIELDS: [&str; 4] = [
    "autores_colaboradores",
    "autores_citados",
    "tradutores",
    "nome_pessoal_como_assunto",
];

/// Engine-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Record fields holding lists of person names
    pub fields: Vec<String>,
    /// When a list is treated as corrupted
    pub corruption: CorruptionPolicy,
    /// Token regrouping for corrupted lists
    pub reconstruction: ReconstructOptions,
    /// Duplicate-name scan thresholds
    pub scan: ScanOptions,
    /// Normalization pass behavior
    pub pipeline: PipelineConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            corruption: CorruptionPolicy::default(),
            reconstruction: ReconstructOptions::default(),
            scan: ScanOptions::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Normalization pass configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Record field used to identify records in the change log
    pub record_id_field: String,
    /// Drop repeated names within one list after normalization
    pub dedupe_within_list: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            record_id_field: "registro".to_string(),
            dedupe_within_list: false,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config file (`.json` or TOML).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AuthorsError::io(path, e))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() || self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AuthorsError::InvalidConfig(
                "fields must name at least one non-blank field".to_string(),
            ));
        }

        check_unit_range("corruption.threshold", self.corruption.threshold)?;
        check_unit_range("scan.similarity_threshold", self.scan.similarity_threshold)?;
        check_unit_range("scan.surname_threshold", self.scan.surname_threshold)?;

        if self.corruption.min_list_len == 0 {
            return Err(AuthorsError::InvalidConfig(
                "corruption.min_list_len must be positive".to_string(),
            ));
        }

        if self.reconstruction.max_given_names == 0 {
            return Err(AuthorsError::InvalidConfig(
                "reconstruction.max_given_names must be positive".to_string(),
            ));
        }

        if self.pipeline.record_id_field.trim().is_empty() {
            return Err(AuthorsError::InvalidConfig(
                "pipeline.record_id_field must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_unit_range(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AuthorsError::InvalidConfig(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fields.len(), 4);
        assert_eq!(config.corruption.threshold, 0.7);
        assert_eq!(config.reconstruction.max_given_names, 3);
        assert_eq!(config.scan.similarity_threshold, 0.85);
    }

    #[test]
    fn test_json_serialization() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_serialization() {
        let config = EngineConfig::default();
        let toml = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml(
            r#"
fields = ["autores_colaboradores"]

[scan]
similarity_threshold = 0.9
"#,
        )
        .unwrap();

        assert_eq!(config.fields, vec!["autores_colaboradores"]);
        assert_eq!(config.scan.similarity_threshold, 0.9);
        assert_eq!(config.scan.surname_threshold, 0.6);
        assert_eq!(config.corruption.min_list_len, 2);
        assert_eq!(config.pipeline.record_id_field, "registro");
    }

    #[test]
    fn test_out_of_range() {
        let mut config = EngineConfig::default();
        config.scan.similarity_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(AuthorsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_fields() {
        let mut config = EngineConfig::default();
        config.fields.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_given_names() {
        let mut config = EngineConfig::default();
        config.reconstruction.max_given_names = 0;
        assert!(config.validate().is_err());
    }
}
