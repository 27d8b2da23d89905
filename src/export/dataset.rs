//! In-memory result table: license normalization and id deduplication

use std::collections::HashSet;

use log::warn;
use serde_json::Value;

use crate::export::ExportError;

/// Column holding the license object
pub const LICENSE_COLUMN: &str = "license";

/// Column rows are deduplicated on
pub const ID_COLUMN: &str = "id";

/// Rows of JSON cells under named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace each license object with its `key`.
    ///
    /// Cells that cannot be normalized are left as they are and logged.
    /// Returns how many cells were malformed.
    pub fn normalize_licenses(&mut self) -> usize {
        let Some(idx) = self.column_index(LICENSE_COLUMN) else {
            return 0;
        };
        let id_idx = self.column_index(ID_COLUMN);

        let mut malformed = 0;
        for row in &mut self.rows {
            let Some(cell) = row.get(idx) else {
                continue;
            };
            match normalize_license(cell) {
                Ok(Some(key)) => row[idx] = key,
                Ok(None) => {}
                Err(e) => {
                    malformed += 1;
                    let id = id_idx.and_then(|i| row.get(i)).unwrap_or(&Value::Null);
                    warn!("row {id}: {e}; keeping the raw value");
                }
            }
        }
        malformed
    }

    /// Split into (first occurrence of each id, later occurrences).
    ///
    /// Row order is kept in both halves. Without an `id` column nothing is
    /// treated as a duplicate.
    #[must_use]
    pub fn dedupe_by_id(self) -> (Dataset, Dataset) {
        let Some(idx) = self.column_index(ID_COLUMN) else {
            warn!("no `{ID_COLUMN}` attribute configured; skipping deduplication");
            let empty = Dataset::new(self.columns.clone(), Vec::new());
            return (self, empty);
        };

        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        let mut duplicates = Vec::new();
        for row in self.rows {
            let key = row.get(idx).map(Value::to_string).unwrap_or_default();
            if seen.insert(key) {
                unique.push(row);
            } else {
                duplicates.push(row);
            }
        }

        (
            Dataset::new(self.columns.clone(), unique),
            Dataset::new(self.columns, duplicates),
        )
    }
}

/// Normalized value for one license cell.
///
/// `Ok(Some(key))` replaces an object with its `key`; `Ok(None)` leaves `null`
/// and already normalized strings alone. Anything else is malformed.
pub fn normalize_license(cell: &Value) -> Result<Option<Value>, ExportError> {
    match cell {
        Value::Null | Value::String(_) => Ok(None),
        Value::Object(obj) => match obj.get("key") {
            Some(Value::String(key)) => Ok(Some(Value::String(key.clone()))),
            _ => Err(ExportError::MalformedLicense(cell.to_string())),
        },
        other => Err(ExportError::MalformedLicense(other.to_string())),
    }
}
