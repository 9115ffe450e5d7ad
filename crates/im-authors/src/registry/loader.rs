//! Rule file loading
//!
//! Rule files are TOML (`.toml`, the default) or JSON (`.json`) with the same
//! shape: a `rules` table of `variant = canonical` and an optional `merge`
//! array. Standard locations are layered in order builtin, user
//! (`~/.im-authors/rules.toml`), project (`<root>/.im-authors/rules.toml`).

use std::path::{Path, PathBuf};

use super::{builtin_rules, CanonicalRegistry, RegistryBuilder, RuleSet, RuleSource};
use crate::error::{AuthorsError, Result};

const RULES_DIR: &str = ".im-authors";
const RULES_FILE: &str = "rules.toml";

impl RuleSet {
    /// Parse a rule set from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a rule set from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a rule file, choosing the format from the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AuthorsError::io(path, e))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}

/// `~/.im-authors/rules.toml`, if a home directory is known
pub fn user_rules_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(RULES_DIR).join(RULES_FILE))
}

/// `<root>/.im-authors/rules.toml`
pub fn project_rules_path(project_root: &Path) -> PathBuf {
    project_root.join(RULES_DIR).join(RULES_FILE)
}

impl RegistryBuilder {
    /// Add the rules from one file.
    pub fn add_file(&mut self, path: &Path) -> Result<&mut Self> {
        let set = RuleSet::load(path)?;
        tracing::info!("Loaded {} rules from {}", set.len(), path.display());
        Ok(self.add(set, RuleSource::File(path.to_path_buf())))
    }

    /// Add the builtin rules.
    pub fn add_builtin(&mut self) -> Result<&mut Self> {
        let set = builtin_rules()?;
        tracing::debug!("Loaded {} builtin rules", set.len());
        Ok(self.add(set, RuleSource::Builtin))
    }

    /// Add rules from a standard location when the file exists.
    ///
    /// A file that cannot be read or parsed is skipped with a warning.
    fn add_if_present(&mut self, path: &Path, source: RuleSource) {
        if !path.is_file() {
            return;
        }
        match RuleSet::load(path) {
            Ok(set) => {
                tracing::info!("Loaded {} {} rules from {}", set.len(), source, path.display());
                self.add(set, source);
            }
            Err(err) => {
                tracing::warn!("Skipping {} rules from {}: {}", source, path.display(), err);
            }
        }
    }
}

impl CanonicalRegistry {
    /// Load rules from standard locations.
    ///
    /// Loads in order: builtin (unless `include_builtin` is false), user
    /// (~/.im-authors/rules.toml), project (.im-authors/rules.toml under
    /// `project_root`). Later sources override earlier ones per variant.
    pub fn load_standard(project_root: Option<&Path>, include_builtin: bool) -> Result<Self> {
        Self::standard_builder(project_root, include_builtin)?.build()
    }

    /// Builder pre-filled with the standard layers, for callers that add
    /// explicit files on top.
    pub fn standard_builder(
        project_root: Option<&Path>,
        include_builtin: bool,
    ) -> Result<RegistryBuilder> {
        let mut builder = RegistryBuilder::new();

        if include_builtin {
            builder.add_builtin()?;
        }

        if let Some(path) = user_rules_path() {
            builder.add_if_present(&path, RuleSource::User);
        }

        if let Some(root) = project_root {
            builder.add_if_present(&project_rules_path(root), RuleSource::Project);
        }

        Ok(builder)
    }

    /// Load a registry from a single rule file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        builder.add_file(path)?;
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_toml_rules() {
        let file = write_temp(
            r#"
[rules]
"GOETHE" = "GOETHE, Johann Wolfgang von"
"JOYCE" = "JOYCE, James"

[[merge]]
parts = ["CAMPOS", "Haroldo de"]
into = "CAMPOS, Haroldo de"
"#,
            ".toml",
        );

        let reg = CanonicalRegistry::load(file.path()).unwrap();
        assert_eq!(reg.resolve("GOETHE"), Some("GOETHE, Johann Wolfgang von"));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.merge_rules().len(), 1);
        assert_eq!(
            reg.source_of("JOYCE"),
            Some(&RuleSource::File(file.path().to_path_buf()))
        );
    }

    #[test]
    fn test_load_json_rules() {
        let file = write_temp(r#"{"rules": {"PASTERNAK": "PASTERNAK, Boris"}}"#, ".json");
        let reg = CanonicalRegistry::load(file.path()).unwrap();
        assert_eq!(reg.resolve("PASTERNAK"), Some("PASTERNAK, Boris"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CanonicalRegistry::load(Path::new("/nonexistent/rules.toml"));
        assert!(matches!(result, Err(AuthorsError::Io { .. })));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_temp("[rules\n", ".toml");
        let result = CanonicalRegistry::load(file.path());
        assert!(matches!(result, Err(AuthorsError::TomlParse(_))));
    }

    #[test]
    fn test_project_layer_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let rules_dir = dir.path().join(RULES_DIR);
        std::fs::create_dir_all(&rules_dir).unwrap();
        std::fs::write(
            rules_dir.join(RULES_FILE),
            "[rules]\n\"BACH\" = \"BACH, J. Sebastian\"\n",
        )
        .unwrap();

        let reg = CanonicalRegistry::load_standard(Some(dir.path()), true).unwrap();
        assert_eq!(reg.resolve("BACH"), Some("BACH, J. Sebastian"));
        assert_eq!(reg.source_of("BACH"), Some(&RuleSource::Project));
        assert_eq!(reg.resolve("JOYCE"), Some("JOYCE, James"));
    }

    #[test]
    fn test_malformed_project_layer_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let rules_dir = dir.path().join(RULES_DIR);
        std::fs::create_dir_all(&rules_dir).unwrap();
        std::fs::write(rules_dir.join(RULES_FILE), "[rules\n\"BACH\" = ").unwrap();

        let reg = CanonicalRegistry::load_standard(Some(dir.path()), true).unwrap();
        assert_eq!(reg.resolve("BACH"), Some("BACH, Johann Sebastian"));
        assert_eq!(reg.source_of("BACH"), Some(&RuleSource::Builtin));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut set = RuleSet::new();
        set.insert("ELIOT, T.S.", "ELIOT, T. S.");
        let text = set.to_toml().unwrap();
        assert_eq!(RuleSet::from_toml_str(&text).unwrap(), set);
    }
}
