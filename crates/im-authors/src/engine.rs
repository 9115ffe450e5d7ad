//! Engine: configuration plus an immutable rule registry

use crate::config::EngineConfig;
use crate::corruption::CorruptionPolicy;
use crate::formatter::{format_name, split_multiline};
use crate::reconstruct::reconstruct_with;
use crate::registry::CanonicalRegistry;
use crate::similarity::SimilarityScanner;

/// Everything a normalization or scan pass needs.
///
/// Built once per run and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    registry: CanonicalRegistry,
}

impl Engine {
    pub fn new(config: EngineConfig, registry: CanonicalRegistry) -> Self {
        Self { config, registry }
    }

    /// Default configuration with the given rules
    pub fn with_registry(registry: CanonicalRegistry) -> Self {
        Self::new(EngineConfig::default(), registry)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &CanonicalRegistry {
        &self.registry
    }

    pub fn corruption_policy(&self) -> &CorruptionPolicy {
        &self.config.corruption
    }

    /// Canonical form of one raw name.
    ///
    /// A curated rule wins over formatting. A string that already is a
    /// curated canonical form is returned as stored. Anything else is
    /// formatted and looked up once more, so `"bach"` reaches the rule for
    /// `"BACH"`. Blank input gives an empty string.
    pub fn canonicalize(&self, raw: &str) -> String {
        if let Some(canonical) = self.registry.resolve(raw) {
            return canonical.to_string();
        }
        if let Some(canonical) = self.registry.canonical_form(raw) {
            return canonical.to_string();
        }

        let formatted = format_name(raw);
        if formatted.is_empty() {
            return formatted;
        }
        match self.registry.resolve(&formatted) {
            Some(canonical) => canonical.to_string(),
            None => formatted,
        }
    }

    /// Check a list against the configured corruption policy.
    pub fn is_corrupted<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.config.corruption.is_corrupted(names)
    }

    /// Regroup a flattened token list with the configured options.
    pub fn reconstruct<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        reconstruct_with(tokens, &self.config.reconstruction)
    }

    /// Scanner with the configured thresholds
    pub fn scanner(&self) -> SimilarityScanner {
        SimilarityScanner::new(self.config.scan.clone())
    }
}

/// Canonicalize free-text form input, one name per line.
///
/// # Examples
/// ```
/// use im_authors::{normalize_author_text, Engine};
/// let engine = Engine::default();
/// assert_eq!(
///     normalize_author_text("Murilo Mendes\n\nBonvicino, Régis", &engine),
///     vec!["MENDES, Murilo", "BONVICINO, Régis"]
/// );
/// ```
pub fn normalize_author_text(text: &str, engine: &Engine) -> Vec<String> {
    split_multiline(text)
        .iter()
        .map(|line| engine.canonicalize(line))
        .filter(|name| !name.is_empty())
        .collect()
}
