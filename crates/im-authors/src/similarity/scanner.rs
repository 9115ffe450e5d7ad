//! Pairwise duplicate scan over a name vocabulary

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::{similarity_ratio, CandidatePair, DuplicateReport, MatchSignal, ScanOptions};
use crate::vocabulary::Vocabulary;

/// Compares every pair of distinct names once.
///
/// The cost is quadratic in the number of distinct names, so the scan is a
/// separate pass from normalization.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScanner {
    options: ScanOptions,
}

impl SimilarityScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan the distinct names of a vocabulary.
    pub fn scan(&self, vocabulary: &Vocabulary) -> DuplicateReport {
        let entries: Vec<(&str, usize)> = vocabulary.iter().collect();
        self.scan_entries(&entries)
    }

    /// Scan a plain list of names, counting repeats.
    pub fn scan_names<I, S>(&self, names: I) -> DuplicateReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary = Vocabulary::from_names(names);
        self.scan(&vocabulary)
    }

    /// Compare two names; `None` when no signal fires.
    ///
    /// The returned pair has its members in sorted order.
    pub fn compare(&self, a: &str, b: &str) -> Option<CandidatePair> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let (score, signals) = self.signals(first, second);
        if signals.is_empty() {
            return None;
        }
        Some(CandidatePair {
            name_a: first.to_string(),
            name_b: second.to_string(),
            score,
            count_a: 0,
            count_b: 0,
            signals,
        })
    }

    fn scan_entries(&self, entries: &[(&str, usize)]) -> DuplicateReport {
        let keys: Vec<String> = entries
            .iter()
            .map(|(name, _)| self.comparison_key(name))
            .collect();
        let mut pairs = Vec::new();

        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (name_a, count_a) = entries[i];
                let (name_b, count_b) = entries[j];

                let score = similarity_ratio(&keys[i], &keys[j]);
                let signals = self.signals_for_score(name_a, name_b, score);
                if signals.is_empty() {
                    continue;
                }

                tracing::debug!("Candidate pair {:.2}: '{}' / '{}'", score, name_a, name_b);
                let (name_a, count_a, name_b, count_b) = if name_a <= name_b {
                    (name_a, count_a, name_b, count_b)
                } else {
                    (name_b, count_b, name_a, count_a)
                };
                pairs.push(CandidatePair {
                    name_a: name_a.to_string(),
                    name_b: name_b.to_string(),
                    score,
                    count_a,
                    count_b,
                    signals,
                });
            }
        }

        // stable: equal scores keep scan order
        pairs.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::info!(
            "Scanned {} distinct names, {} candidate pairs",
            entries.len(),
            pairs.len()
        );

        DuplicateReport {
            pairs,
            names_scanned: entries.len(),
        }
    }

    fn signals(&self, a: &str, b: &str) -> (f64, Vec<MatchSignal>) {
        let score = similarity_ratio(&self.comparison_key(a), &self.comparison_key(b));
        (score, self.signals_for_score(a, b, score))
    }

    fn signals_for_score(&self, a: &str, b: &str, score: f64) -> Vec<MatchSignal> {
        let mut signals = Vec::new();
        if score > self.options.similarity_threshold {
            signals.push(MatchSignal::NearIdentical);
        }
        if score > self.options.surname_threshold && shares_surname(a, b) {
            signals.push(MatchSignal::SharedSurname);
        }
        signals
    }

    fn comparison_key(&self, name: &str) -> String {
        if self.options.fold_diacritics {
            fold_diacritics(name).to_lowercase()
        } else {
            name.to_lowercase()
        }
    }
}

/// Both names have a comma and the same trimmed text before it.
fn shares_surname(a: &str, b: &str) -> bool {
    match (a.split_once(','), b.split_once(',')) {
        (Some((surname_a, _)), Some((surname_b, _))) => surname_a.trim() == surname_b.trim(),
        _ => false,
    }
}

/// Decompose and drop combining marks: `"João"` -> `"Joao"`.
fn fold_diacritics(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}
