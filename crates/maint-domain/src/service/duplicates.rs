//! Duplicate plate detection across unresolved rows

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ColumnMap, SheetRecord};
use crate::service::plate::normalize_plate;

/// Plates appearing on more than one row that has not checked back in.
/// Positions are 1-based indices into the loaded record set, in original
/// order; they are not renumbered by filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateIndex {
    counts: HashMap<String, usize>,
    rows: HashMap<String, Vec<u32>>,
}

impl DuplicateIndex {
    /// True when the normalized plate appears on 2+ unresolved rows
    pub fn is_duplicate(&self, normalized_plate: &str) -> bool {
        self.counts.contains_key(normalized_plate)
    }

    /// Unresolved-row positions for a plate (singletons included)
    pub fn positions(&self, normalized_plate: &str) -> &[u32] {
        self.rows
            .get(normalized_plate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total rows involved in duplicate groups
    pub fn duplicate_row_count(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Build the duplicate index from scratch. Only rows with a non-empty
/// normalized plate and an empty date-in participate; once a row checks
/// in it drops out of duplicate accounting on the next recompute.
pub fn detect_duplicates(records: &[SheetRecord], columns: &ColumnMap) -> DuplicateIndex {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut rows: HashMap<String, Vec<u32>> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        let plate = columns
            .vehicle_value(record)
            .map(normalize_plate)
            .unwrap_or_default();
        if plate.is_empty() || columns.has_date_in(record) {
            continue;
        }
        *counts.entry(plate.clone()).or_insert(0) += 1;
        rows.entry(plate).or_default().push(idx as u32 + 1);
    }
    counts.retain(|_, c| *c > 1);
    DuplicateIndex { counts, rows }
}
