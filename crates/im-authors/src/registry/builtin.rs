//! Builtin rules shipped with im-authors
//!
//! The table lives in `data/canonical_authors.toml` so curators can edit it
//! like any other rule file; user and project rule files override it.

use super::RuleSet;
use crate::error::Result;

/// Source text of the builtin rule file
pub const BUILTIN_RULES_TOML: &str = include_str!("../../data/canonical_authors.toml");

/// Parse the builtin rule set.
pub fn builtin_rules() -> Result<RuleSet> {
    RuleSet::from_toml_str(BUILTIN_RULES_TOML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CanonicalRegistry, RuleSource};

    #[test]
    fn test_builtin_rules_parse() {
        let rules = builtin_rules().unwrap();
        assert!(rules.rules.len() > 80);
        assert!(!rules.merge.is_empty());
    }

    #[test]
    fn test_builtin_registry_builds() {
        let reg = CanonicalRegistry::from_rule_set(builtin_rules().unwrap(), RuleSource::Builtin)
            .unwrap();
        assert_eq!(reg.resolve("BACH"), Some("BACH, Johann Sebastian"));
        assert_eq!(reg.resolve("KOZER, Jose"), Some("KOZER, José"));
        assert_eq!(
            reg.resolve("ANDRADE, De"),
            Some("DRUMMOND, Carlos (de Andrade)")
        );
        assert_eq!(reg.resolve("CUMMINGS, E. E."), Some("CUMMINGS, e. e."));
    }
}
