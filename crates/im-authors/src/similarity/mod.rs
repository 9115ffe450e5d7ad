//! Approximate matching of catalog names
//!
//! Flags pairs of distinct names that plausibly denote the same person,
//! such as `"SILVA, J."` and `"SILVA, José"`. The scan only reports; merging
//! is a curator decision recorded as a canonical rule.

mod ratio;
mod scanner;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use ratio::similarity_ratio;
pub use scanner::SimilarityScanner;

/// Default ratio that must be exceeded for a near-identical pair
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Default ratio that must be exceeded for a pair sharing a surname
pub const DEFAULT_SURNAME_THRESHOLD: f64 = 0.60;

/// Scanner thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Pairs scoring strictly above this are near-identical
    pub similarity_threshold: f64,
    /// Pairs with the same surname scoring strictly above this are flagged
    pub surname_threshold: f64,
    /// Strip accents before comparing (`"José"` matches `"Jose"` exactly)
    pub fold_diacritics: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            surname_threshold: DEFAULT_SURNAME_THRESHOLD,
            fold_diacritics: false,
        }
    }
}

/// Why a pair was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSignal {
    /// Overall ratio above the similarity threshold
    NearIdentical,
    /// Same text before the comma and ratio above the surname threshold
    SharedSurname,
}

impl fmt::Display for MatchSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSignal::NearIdentical => write!(f, "near-identical"),
            MatchSignal::SharedSurname => write!(f, "shared surname"),
        }
    }
}

/// Two names flagged as a possible duplicate.
///
/// `name_a` sorts before `name_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub name_a: String,
    pub name_b: String,
    /// Similarity ratio of the lower-cased names
    pub score: f64,
    /// Occurrences of `name_a` in the catalog
    pub count_a: usize,
    /// Occurrences of `name_b` in the catalog
    pub count_b: usize,
    pub signals: Vec<MatchSignal>,
}

impl CandidatePair {
    pub fn has_signal(&self, signal: MatchSignal) -> bool {
        self.signals.contains(&signal)
    }
}

impl fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}] '{}' ({})  <-->  '{}' ({})",
            self.score, self.name_a, self.count_a, self.name_b, self.count_b
        )
    }
}

/// Ranked candidate pairs, highest score first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub pairs: Vec<CandidatePair>,
    /// Distinct names compared
    pub names_scanned: usize,
}

impl DuplicateReport {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidatePair> {
        self.pairs.iter()
    }

    /// Keep only the `limit` best pairs.
    pub fn truncate(&mut self, limit: usize) {
        self.pairs.truncate(limit);
    }

    /// Pairs involving `name`
    pub fn pairs_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CandidatePair> {
        self.pairs
            .iter()
            .filter(move |p| p.name_a == name || p.name_b == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.pairs {
            writeln!(f, "{}", pair)?;
        }
        Ok(())
    }
}
