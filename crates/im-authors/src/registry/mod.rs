//! Curated canonical-name rules
//!
//! The registry provides:
//! - Exact and whitespace-collapsed lookup of known name variants
//! - Layered loading of rule files (builtin > user > project > explicit)
//! - List-level merge rules for names split into adjacent fragments
//!
//! Rules are data. A registry is built once, is immutable afterwards, and is
//! passed to the [`Engine`](crate::Engine) explicitly.

mod builtin;
mod loader;

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AuthorsError, Result};
use crate::formatter::collapse_whitespace;

pub use builtin::{builtin_rules, BUILTIN_RULES_TOML};
pub use loader::{project_rules_path, user_rules_path};

/// A set of curated rules as stored in a rule file.
///
/// ```toml
/// [rules]
/// "BACH" = "BACH, Johann Sebastian"
/// "KOZER, Jose" = "KOZER, José"
///
/// [[merge]]
/// parts = ["ANDRADE, De", "DRUMMUND, Carlos"]
/// into = "ANDRADE, Carlos Drummond de"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Raw variant -> canonical form
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    /// Adjacent fragments -> single name
    #[serde(default)]
    pub merge: Vec<MergeRule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single variant -> canonical rule
    pub fn insert(&mut self, variant: &str, canonical: &str) {
        self.rules.insert(variant.to_string(), canonical.to_string());
    }

    /// Number of variant rules plus merge rules
    pub fn len(&self) -> usize {
        self.rules.len() + self.merge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.merge.is_empty()
    }
}

/// Replace a run of adjacent list entries by one name.
///
/// Catalogs repaired by older scripts sometimes hold one person as two
/// entries (`"ANDRADE, De"`, `"DRUMMUND, Carlos"`); a merge rule joins them
/// back before per-name canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    pub parts: Vec<String>,
    pub into: String,
}

/// Where a rule was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Shipped with im-authors
    Builtin,
    /// Loaded from ~/.im-authors/rules.toml
    User,
    /// Loaded from .im-authors/rules.toml in the project directory
    Project,
    /// Loaded from a file named on the command line or by the caller
    File(PathBuf),
    /// Added programmatically
    Inline,
}

impl RuleSource {
    /// Resolution priority (higher = takes precedence)
    pub fn priority(&self) -> u8 {
        match self {
            RuleSource::Builtin => 0,
            RuleSource::User => 1,
            RuleSource::Project => 2,
            RuleSource::File(_) => 3,
            RuleSource::Inline => 4,
        }
    }
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSource::Builtin => write!(f, "builtin"),
            RuleSource::User => write!(f, "user"),
            RuleSource::Project => write!(f, "project"),
            RuleSource::File(path) => write!(f, "{}", path.display()),
            RuleSource::Inline => write!(f, "inline"),
        }
    }
}

/// Accumulates rule layers before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: BTreeMap<String, (String, RuleSource)>,
    merges: Vec<(MergeRule, RuleSource)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer of rules.
    ///
    /// A variant already present is replaced only if the new source has
    /// equal or higher priority.
    pub fn add(&mut self, set: RuleSet, source: RuleSource) -> &mut Self {
        for (variant, canonical) in set.rules {
            let key = variant.trim().to_string();
            let replace = match self.rules.get(&key) {
                Some((_, existing)) => source.priority() >= existing.priority(),
                None => true,
            };
            if replace {
                self.rules.insert(key, (canonical, source.clone()));
            }
        }
        for rule in set.merge {
            self.merges.retain(|(existing, _)| existing.parts != rule.parts);
            self.merges.push((rule, source.clone()));
        }
        self
    }

    /// Validate the rules, resolve chains, and freeze the registry.
    pub fn build(self) -> Result<CanonicalRegistry> {
        let mut direct: HashMap<String, String> = HashMap::new();
        let mut sources = HashMap::new();

        for (variant, (canonical, source)) in self.rules {
            if variant.is_empty() {
                return Err(AuthorsError::InvalidRule(format!(
                    "blank variant in {} rules",
                    source
                )));
            }
            if canonical.trim().is_empty() {
                return Err(AuthorsError::InvalidRule(format!(
                    "blank canonical form for '{}' in {} rules",
                    variant, source
                )));
            }
            direct.insert(variant.clone(), canonical);
            sources.insert(variant, source);
        }

        for (rule, source) in &self.merges {
            if rule.parts.len() < 2 {
                return Err(AuthorsError::InvalidRule(format!(
                    "merge rule into '{}' in {} rules needs at least two parts",
                    rule.into, source
                )));
            }
            if rule.into.trim().is_empty() || rule.parts.iter().any(|p| p.trim().is_empty()) {
                return Err(AuthorsError::InvalidRule(format!(
                    "merge rule in {} rules has a blank name",
                    source
                )));
            }
        }

        let direct_collapsed: HashMap<String, String> = direct
            .iter()
            .map(|(k, v)| (collapse_whitespace(k), v.clone()))
            .collect();

        let mut exact = HashMap::with_capacity(direct.len());
        for (variant, canonical) in &direct {
            let resolved = follow_chain(variant, canonical, &direct, &direct_collapsed)?;
            exact.insert(variant.clone(), resolved);
        }

        let collapsed = exact
            .iter()
            .map(|(k, v)| (collapse_whitespace(k), v.clone()))
            .collect();

        let canonical = exact
            .values()
            .map(|v| (collapse_whitespace(v), v.clone()))
            .collect();

        let merges = self
            .merges
            .into_iter()
            .map(|(rule, _)| MergeRule {
                parts: rule.parts.iter().map(|p| collapse_whitespace(p)).collect(),
                into: rule.into,
            })
            .collect();

        Ok(CanonicalRegistry {
            exact,
            collapsed,
            canonical,
            merges,
            sources,
        })
    }
}

fn lookup<'a>(
    raw: &str,
    exact: &'a HashMap<String, String>,
    collapsed: &'a HashMap<String, String>,
) -> Option<&'a String> {
    let trimmed = raw.trim();
    exact
        .get(trimmed)
        .or_else(|| collapsed.get(&collapse_whitespace(trimmed)))
}

/// Follow `variant -> canonical -> ...` until a value that is not itself a
/// variant (or maps to itself).
fn follow_chain(
    variant: &str,
    canonical: &str,
    exact: &HashMap<String, String>,
    collapsed: &HashMap<String, String>,
) -> Result<String> {
    let mut chain = vec![variant.to_string()];
    let mut current = canonical.to_string();

    while let Some(next) = lookup(&current, exact, collapsed) {
        if collapse_whitespace(next) == collapse_whitespace(&current) {
            break;
        }
        if chain.contains(&current) {
            chain.push(current);
            return Err(AuthorsError::RuleCycle(chain));
        }
        chain.push(current);
        current = next.clone();
    }

    Ok(current)
}

/// Immutable lookup table of curated canonical names.
#[derive(Debug, Clone, Default)]
pub struct CanonicalRegistry {
    exact: HashMap<String, String>,
    collapsed: HashMap<String, String>,
    /// Collapsed canonical value -> verbatim canonical value
    canonical: HashMap<String, String>,
    merges: Vec<MergeRule>,
    sources: HashMap<String, RuleSource>,
}

impl CanonicalRegistry {
    /// A registry with no rules; every name goes through the formatter.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from a single rule set.
    pub fn from_rule_set(set: RuleSet, source: RuleSource) -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        builder.add(set, source);
        builder.build()
    }

    /// Build a registry from `(variant, canonical)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let set = RuleSet {
            rules: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            merge: Vec::new(),
        };
        Self::from_rule_set(set, RuleSource::Inline)
    }

    /// Builtin rules only.
    pub fn builtin() -> Result<Self> {
        Self::from_rule_set(builtin_rules()?, RuleSource::Builtin)
    }

    /// Resolve a raw name to its curated canonical form.
    ///
    /// Tries the exact trimmed string first, then the whitespace-collapsed
    /// string. The canonical form is returned verbatim.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        lookup(raw, &self.exact, &self.collapsed).map(String::as_str)
    }

    /// Return the verbatim canonical form if `name` already is one.
    pub fn canonical_form(&self, name: &str) -> Option<&str> {
        self.canonical
            .get(&collapse_whitespace(name))
            .map(String::as_str)
    }

    /// True if `name` is the target of some rule.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical_form(name).is_some()
    }

    /// Replace runs of adjacent fragments matched by merge rules.
    ///
    /// Fragments are compared after whitespace collapsing. The first rule
    /// that matches at a position wins.
    pub fn apply_merges(&self, names: &[String]) -> Vec<String> {
        if self.merges.is_empty() {
            return names.to_vec();
        }

        let collapsed: Vec<String> = names.iter().map(|n| collapse_whitespace(n)).collect();
        let mut result = Vec::with_capacity(names.len());
        let mut i = 0;

        while i < names.len() {
            let matched = self.merges.iter().find(|rule| {
                let end = i + rule.parts.len();
                end <= collapsed.len() && collapsed[i..end] == rule.parts[..]
            });

            match matched {
                Some(rule) => {
                    result.push(rule.into.clone());
                    i += rule.parts.len();
                }
                None => {
                    result.push(names[i].clone());
                    i += 1;
                }
            }
        }

        result
    }

    /// Source of the rule that resolves `raw`, if any.
    pub fn source_of(&self, raw: &str) -> Option<&RuleSource> {
        let trimmed = raw.trim();
        if let Some(source) = self.sources.get(trimmed) {
            return Some(source);
        }
        let collapsed = collapse_whitespace(trimmed);
        self.sources
            .iter()
            .find(|(variant, _)| collapse_whitespace(variant) == collapsed)
            .map(|(_, source)| source)
    }

    /// Number of variant rules
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.merges.is_empty()
    }

    /// Merge rules in application order
    pub fn merge_rules(&self) -> &[MergeRule] {
        &self.merges
    }

    /// All `(variant, resolved canonical)` pairs, sorted by variant.
    pub fn rules(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .exact
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(pairs: &[(&str, &str)]) -> CanonicalRegistry {
        CanonicalRegistry::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_exact_lookup_trims_input() {
        let reg = registry(&[("BACH", "BACH, Johann Sebastian")]);
        assert_eq!(reg.resolve("BACH"), Some("BACH, Johann Sebastian"));
        assert_eq!(reg.resolve("  BACH \n"), Some("BACH, Johann Sebastian"));
        assert_eq!(reg.resolve("Bach"), None);
    }

    #[test]
    fn test_collapsed_lookup() {
        let reg = registry(&[("BACH, J. S.", "BACH, Johann Sebastian")]);
        assert_eq!(reg.resolve("BACH,  J.   S."), Some("BACH, Johann Sebastian"));
    }

    #[test]
    fn test_values_are_verbatim() {
        let reg = registry(&[("MÃE, Valter Hugo", "MÃE, valter hugo")]);
        assert_eq!(reg.resolve("MÃE, Valter Hugo"), Some("MÃE, valter hugo"));
        assert!(reg.is_canonical("MÃE, valter hugo"));
        assert_eq!(reg.canonical_form("MÃE,  valter hugo"), Some("MÃE, valter hugo"));
    }

    #[test]
    fn test_chains_are_resolved() {
        let reg = registry(&[
            ("ANDRADE, De", "DRUMMOND, Carlos"),
            ("DRUMMOND, Carlos", "DRUMMOND, Carlos (de Andrade)"),
        ]);
        assert_eq!(
            reg.resolve("ANDRADE, De"),
            Some("DRUMMOND, Carlos (de Andrade)")
        );
        assert!(!reg.is_canonical("DRUMMOND, Carlos"));
    }

    #[test]
    fn test_self_mapping_is_not_a_cycle() {
        let reg = registry(&[("GIL", "GIL"), ("GIL, G.", "GIL")]);
        assert_eq!(reg.resolve("GIL, G."), Some("GIL"));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let result = CanonicalRegistry::from_pairs([("A", "B"), ("B", "A")]);
        assert!(matches!(result, Err(AuthorsError::RuleCycle(_))));
    }

    #[test]
    fn test_blank_canonical_is_rejected() {
        let result = CanonicalRegistry::from_pairs([("A", "  ")]);
        assert!(matches!(result, Err(AuthorsError::InvalidRule(_))));
    }

    #[test]
    fn test_layer_priority() {
        let mut user = RuleSet::new();
        user.insert("GIL", "GIL, Gilberto Passos");
        let mut builtin = RuleSet::new();
        builtin.insert("GIL", "GIL, Gilberto");

        let mut builder = CanonicalRegistry::builder();
        builder.add(user, RuleSource::User);
        builder.add(builtin, RuleSource::Builtin);
        let reg = builder.build().unwrap();

        assert_eq!(reg.resolve("GIL"), Some("GIL, Gilberto Passos"));
        assert_eq!(reg.source_of("GIL"), Some(&RuleSource::User));
    }

    #[test]
    fn test_apply_merges() {
        let set = RuleSet {
            rules: BTreeMap::new(),
            merge: vec![MergeRule {
                parts: vec!["ANDRADE, De".into(), "DRUMMUND, Carlos".into()],
                into: "ANDRADE, Carlos Drummond de".into(),
            }],
        };
        let reg = CanonicalRegistry::from_rule_set(set, RuleSource::Inline).unwrap();
        let names: Vec<String> = ["MENDES, Murilo", "ANDRADE, De", "DRUMMUND,  Carlos"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            reg.apply_merges(&names),
            vec!["MENDES, Murilo", "ANDRADE, Carlos Drummond de"]
        );
    }

    #[test]
    fn test_merge_needs_two_parts() {
        let set = RuleSet {
            rules: BTreeMap::new(),
            merge: vec![MergeRule {
                parts: vec!["ANDRADE, De".into()],
                into: "ANDRADE, Carlos Drummond de".into(),
            }],
        };
        let result = CanonicalRegistry::from_rule_set(set, RuleSource::Inline);
        assert!(matches!(result, Err(AuthorsError::InvalidRule(_))));
    }
}
