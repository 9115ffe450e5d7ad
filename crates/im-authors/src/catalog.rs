//! The catalog document
//!
//! A catalog is a JSON array of record objects. Records are kept as generic
//! JSON maps so that fields this crate does not know about, and the order
//! of keys, survive a load/save cycle.

use std::path::Path;

use serde_json::Value;

use crate::error::{AuthorsError, Result};

/// One catalog record
pub type Record = serde_json::Map<String, Value>;

/// An ordered list of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Build a catalog from a parsed JSON value.
    ///
    /// The value must be an array whose elements are all objects.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(AuthorsError::InvalidCatalog(
                "top level must be an array of records".to_string(),
            ));
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(AuthorsError::InvalidCatalog(format!(
                    "record {} is not an object: {}",
                    idx,
                    value_kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Read a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AuthorsError::io(path, e))?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!("Loaded {} records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Write the catalog as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = self.to_json_pretty()?;
        content.push('\n');
        std::fs::write(path, content).map_err(|e| AuthorsError::io(path, e))?;
        tracing::info!("Saved {} records to {}", self.len(), path.display());
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Identifier of a record for logs: the string or number in `id_field`,
/// otherwise `index_{idx}`.
pub fn record_id(record: &Record, idx: usize, id_field: &str) -> String {
    match record.get(id_field) {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => format!("index_{}", idx),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
