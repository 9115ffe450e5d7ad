//! Audit trail of a normalization pass

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a field was repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    /// Corrupted list regrouped from isolated tokens
    Reconstructed,
    /// Names canonicalized one by one
    Normalized,
}

impl fmt::Display for RepairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairKind::Reconstructed => write!(f, "reconstructed"),
            RepairKind::Normalized => write!(f, "normalized"),
        }
    }
}

/// One field whose value was replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Position of the record in the catalog
    pub record_index: usize,
    /// Value of the id field, or `index_{n}`
    pub record_id: String,
    pub field: String,
    pub repair: RepairKind,
    /// String entries of the original list
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Changes in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    changes: Vec<FieldChange>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: FieldChange) {
        self.changes.push(change);
    }

    /// Number of changed fields
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.iter()
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Number of distinct records with at least one change
    pub fn records_changed(&self) -> usize {
        self.changes
            .iter()
            .map(|c| c.record_index)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Fields repaired by reconstruction
    pub fn reconstructed_count(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.repair == RepairKind::Reconstructed)
            .count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text audit log, one block per record.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChangeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current: Option<usize> = None;
        for change in &self.changes {
            if current != Some(change.record_index) {
                writeln!(f, "Record {}:", change.record_id)?;
                current = Some(change.record_index);
            }
            writeln!(
                f,
                "  {}: {} -> {}",
                change.field,
                quoted_list(&change.before),
                quoted_list(&change.after)
            )?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a FieldChange;
    type IntoIter = std::slice::Iter<'a, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// `["A", "B"]`
fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("{:?}", n)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(index: usize, field: &str, repair: RepairKind) -> FieldChange {
        FieldChange {
            record_index: index,
            record_id: format!("R{:03}", index + 1),
            field: field.to_string(),
            repair,
            before: vec!["MENDES".to_string(), "MURILO".to_string()],
            after: vec!["MENDES, Murilo".to_string()],
        }
    }

    #[test]
    fn test_render_groups_by_record() {
        let mut log = ChangeLog::new();
        log.push(change(0, "autores_colaboradores", RepairKind::Reconstructed));
        log.push(change(0, "tradutores", RepairKind::Normalized));
        log.push(change(2, "autores_citados", RepairKind::Normalized));

        let text = log.render();
        assert_eq!(
            text,
            "Record R001:\n\
             \x20 autores_colaboradores: [\"MENDES\", \"MURILO\"] -> [\"MENDES, Murilo\"]\n\
             \x20 tradutores: [\"MENDES\", \"MURILO\"] -> [\"MENDES, Murilo\"]\n\
             Record R003:\n\
             \x20 autores_citados: [\"MENDES\", \"MURILO\"] -> [\"MENDES, Murilo\"]\n"
        );
    }

    #[test]
    fn test_counts() {
        let mut log = ChangeLog::new();
        assert!(log.is_empty());
        log.push(change(0, "autores_colaboradores", RepairKind::Reconstructed));
        log.push(change(0, "tradutores", RepairKind::Normalized));
        log.push(change(4, "tradutores", RepairKind::Normalized));

        assert_eq!(log.len(), 3);
        assert_eq!(log.records_changed(), 2);
        assert_eq!(log.reconstructed_count(), 1);
    }

    #[test]
    fn test_json() {
        let mut log = ChangeLog::new();
        log.push(change(0, "tradutores", RepairKind::Reconstructed));
        let json = log.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"reconstructed\""));
        let parsed: ChangeLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }
}
