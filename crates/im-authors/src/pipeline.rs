//! Catalog normalization pass
//!
//! For every record and every configured author field:
//!
//! 1. Non-list values are left alone.
//! 2. String entries are trimmed; blanks and non-strings are skipped.
//! 3. Merge rules join adjacent fragments of one name.
//! 4. A corrupted list is regrouped into full names. Entries that already
//!    are curated canonical forms (`"ARISTÓTELES"`) are neither counted by
//!    the detector nor regrouped.
//! 5. Each name is canonicalized (curated rule, else formatting).
//! 6. The field is replaced only when the result differs from what was
//!    stored, and the replacement is recorded in the change log.

use std::collections::HashSet;

use serde_json::Value;

use crate::catalog::{record_id, Catalog};
use crate::changelog::{ChangeLog, FieldChange, RepairKind};
use crate::engine::Engine;

/// Result of [`normalize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationOutcome {
    pub catalog: Catalog,
    pub changes: ChangeLog,
}

/// Normalized names of one list and how they were obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedList {
    pub names: Vec<String>,
    pub repair: RepairKind,
}

/// Normalize one list of JSON values.
pub fn normalize_name_list(values: &[Value], engine: &Engine) -> NormalizedList {
    let names = string_entries(values);
    let names = engine.registry().apply_merges(&names);

    let loose: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !engine.registry().is_canonical(name))
        .collect();

    let (names, repair) = if engine.is_corrupted(&loose) {
        (reconstruct_around_curated(&names, engine), RepairKind::Reconstructed)
    } else {
        (names, RepairKind::Normalized)
    };

    // Regrouped names also go through the rules so a second pass is a no-op
    let names: Vec<String> = names
        .iter()
        .map(|name| engine.canonicalize(name))
        .filter(|name| !name.is_empty())
        .collect();

    let names = if engine.config().pipeline.dedupe_within_list {
        dedupe(names)
    } else {
        names
    };

    NormalizedList { names, repair }
}

/// Normalize the author fields of every record.
///
/// The input catalog is not modified. Records and fields without changes
/// are copied as they were.
pub fn normalize(catalog: &Catalog, engine: &Engine) -> NormalizationOutcome {
    let config = engine.config();
    let mut records = catalog.records().to_vec();
    let mut changes = ChangeLog::new();

    for (idx, record) in records.iter_mut().enumerate() {
        for field in &config.fields {
            let Some(Value::Array(values)) = record.get(field) else {
                continue;
            };

            let normalized = normalize_name_list(values, engine);
            let after: Vec<Value> = normalized
                .names
                .iter()
                .cloned()
                .map(Value::String)
                .collect();
            if &after == values {
                continue;
            }

            let change = FieldChange {
                record_index: idx,
                record_id: record_id(record, idx, &config.pipeline.record_id_field),
                field: field.clone(),
                repair: normalized.repair,
                before: raw_strings(values),
                after: normalized.names,
            };
            tracing::debug!(
                "Record {}: {} {} ({} -> {} names)",
                change.record_id,
                change.repair,
                change.field,
                change.before.len(),
                change.after.len()
            );

            // Map::insert on an existing key keeps its position
            record.insert(field.clone(), Value::Array(after));
            changes.push(change);
        }
    }

    tracing::info!(
        "Normalized {} records: {} fields changed in {} records ({} reconstructed)",
        records.len(),
        changes.len(),
        changes.records_changed(),
        changes.reconstructed_count()
    );

    NormalizationOutcome {
        catalog: Catalog::new(records),
        changes,
    }
}

/// Regroup the runs of entries between curated canonical forms.
fn reconstruct_around_curated(names: &[String], engine: &Engine) -> Vec<String> {
    let mut result = Vec::with_capacity(names.len());
    let mut run: Vec<&str> = Vec::new();

    for name in names {
        if engine.registry().is_canonical(name) {
            result.extend(engine.reconstruct(&run));
            run.clear();
            result.push(name.clone());
        } else {
            run.push(name);
        }
    }
    result.extend(engine.reconstruct(&run));
    result
}

/// Trimmed, non-blank string entries
fn string_entries(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// String entries as stored, for the change log
fn raw_strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
