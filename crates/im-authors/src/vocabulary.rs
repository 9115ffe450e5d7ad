//! Distinct names of a catalog with occurrence counts

use std::collections::BTreeMap;

use regex::RegexBuilder;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;

/// A name and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

/// Trimmed, non-blank names with total and per-field counts.
///
/// Names keep their original casing and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    counts: BTreeMap<String, usize>,
    field_counts: BTreeMap<String, BTreeMap<String, usize>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the string entries of list-valued `fields` in every record.
    pub fn from_catalog<S: AsRef<str>>(catalog: &Catalog, fields: &[S]) -> Self {
        let mut vocabulary = Self::new();
        for record in catalog.records() {
            for field in fields {
                let field = field.as_ref();
                let Some(values) = record.get(field).and_then(|v| v.as_array()) else {
                    continue;
                };
                for name in values.iter().filter_map(|v| v.as_str()) {
                    vocabulary.add(name, Some(field));
                }
            }
        }
        vocabulary
    }

    /// Count a plain sequence of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::new();
        for name in names {
            vocabulary.add(name.as_ref(), None);
        }
        vocabulary
    }

    /// Count one occurrence; blank names are ignored.
    pub fn add(&mut self, name: &str, field: Option<&str>) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
        if let Some(field) = field {
            *self
                .field_counts
                .entry(field.to_string())
                .or_default()
                .entry(name.to_string())
                .or_insert(0) += 1;
        }
    }

    /// Total occurrences of `name` (trimmed)
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name.trim()).copied().unwrap_or(0)
    }

    /// Occurrences of `name` within one field
    pub fn field_count(&self, field: &str, name: &str) -> usize {
        self.field_counts
            .get(field)
            .and_then(|names| names.get(name.trim()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total occurrences across all names
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(name, count)` in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn entries(&self) -> Vec<NameCount> {
        self.iter()
            .map(|(name, count)| NameCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    /// Fields that contributed at least one name
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_counts.keys().map(String::as_str)
    }

    /// Names of one field in sorted order
    pub fn field_entries(&self, field: &str) -> Vec<NameCount> {
        self.field_counts
            .get(field)
            .map(|names| {
                names
                    .iter()
                    .map(|(name, count)| NameCount {
                        name: name.clone(),
                        count: *count,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names matching a case-insensitive regular expression.
    ///
    /// ```
    /// use im_authors::Vocabulary;
    /// let vocab = Vocabulary::from_names(["CABRAL, João", "MELO NETO, João Cabral de", "BACH"]);
    /// let hits = vocab.search("cabral|melo neto").unwrap();
    /// assert_eq!(hits.len(), 2);
    /// ```
    pub fn search(&self, pattern: &str) -> Result<Vec<NameCount>> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self
            .iter()
            .filter(|(name, _)| regex.is_match(name))
            .map(|(name, count)| NameCount {
                name: name.to_string(),
                count,
            })
            .collect())
    }
}
