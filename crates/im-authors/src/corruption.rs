//! Detection of name lists flattened into isolated words
//!
//! An earlier form parser split author fields on commas as well as newlines,
//! so `"MENDES, Murilo"` was stored as the two entries `"MENDES"` and
//! `"Murilo"`. Such a list reads like a bag of surnames and given names
//! instead of a list of people.

use serde::{Deserialize, Serialize};

/// Default share of single-token entries above which a list is corrupted
pub const DEFAULT_CORRUPTION_THRESHOLD: f64 = 0.7;

/// Lists shorter than this are never treated as corrupted
pub const DEFAULT_MIN_LIST_LEN: usize = 2;

/// When a list counts as corrupted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorruptionPolicy {
    /// Share of single-token entries that must be strictly exceeded
    pub threshold: f64,
    /// Minimum list length for the check to apply
    pub min_list_len: usize,
}

impl Default for CorruptionPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CORRUPTION_THRESHOLD,
            min_list_len: DEFAULT_MIN_LIST_LEN,
        }
    }
}

impl CorruptionPolicy {
    /// Check a list against this policy.
    ///
    /// True when the single-token entries are strictly more than
    /// `threshold` of the list. Empty lists and lists shorter than
    /// `min_list_len` are never corrupted, so a lone mononym is left alone.
    pub fn is_corrupted<S: AsRef<str>>(&self, names: &[S]) -> bool {
        if names.is_empty() || names.len() < self.min_list_len {
            return false;
        }

        let single_tokens = names
            .iter()
            .filter(|name| is_single_token(name.as_ref()))
            .count();

        single_tokens as f64 > names.len() as f64 * self.threshold
    }
}

/// True if the entry has no space and no comma once trimmed.
pub fn is_single_token(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.contains(' ') && !trimmed.contains(',')
}

/// Check a list with the default policy (> 70% single tokens, length >= 2).
///
/// # Examples
/// ```
/// use im_authors::is_corrupted;
/// assert!(is_corrupted(&["MENDES", "MURILO", "CABRAL", "JOÃO"]));
/// assert!(!is_corrupted(&["MENDES, Murilo", "CABRAL, João"]));
/// ```
pub fn is_corrupted<S: AsRef<str>>(names: &[S]) -> bool {
    CorruptionPolicy::default().is_corrupted(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_single_tokens() {
        assert!(is_corrupted(&["MENDES", "MURILO", "CABRAL", "JOÃO"]));
    }

    #[test]
    fn test_well_formed_list() {
        assert!(!is_corrupted(&["MENDES, Murilo", "CABRAL, João"]));
    }

    #[test]
    fn test_empty_list() {
        let empty: [&str; 0] = [];
        assert!(!is_corrupted(&empty));
    }

    #[test]
    fn test_single_mononym_is_not_corrupted() {
        assert!(!is_corrupted(&["BACH"]));
    }

    #[test]
    fn test_exactly_seventy_percent_is_not_corrupted() {
        let mut names = vec!["A"; 7];
        names.extend(["SILVA, José", "SOUZA, Ana", "LIMA, Rui"]);
        assert_eq!(names.len(), 10);
        assert!(!is_corrupted(&names));

        names[7] = "B";
        assert!(is_corrupted(&names));
    }

    #[test]
    fn test_half_single_tokens() {
        assert!(!is_corrupted(&["KOZER", "José Kozer"]));
    }

    #[test]
    fn test_single_token_ignores_padding() {
        assert!(is_single_token("  MENDES  "));
        assert!(!is_single_token("MENDES,"));
        assert!(!is_single_token("Murilo Mendes"));
    }

    #[test]
    fn test_custom_policy() {
        let policy = CorruptionPolicy {
            threshold: 0.5,
            min_list_len: 1,
        };
        assert!(policy.is_corrupted(&["BACH"]));
        assert!(!policy.is_corrupted(&["KOZER", "José Kozer"]));
    }
}
