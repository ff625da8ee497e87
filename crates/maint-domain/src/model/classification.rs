//! Classification result types

use serde::{Deserialize, Serialize};

use crate::model::SheetRecord;
use maint_types::{CarType, RepairStatus};

/// Derived status of a single maintenance row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Whole days past the damage-specific threshold, when exceeded
    pub days_delayed: Option<i64>,
    pub car_type: CarType,
    pub repair_status: RepairStatus,
    /// Source positions (1-based) of other unresolved rows sharing the plate
    pub duplicate_rows: Vec<u32>,
    /// Display note: car type + status, plus duplicate cross-reference
    pub note: String,
}

/// A visible row after filtering: re-numbered display index, original
/// source position, and the classification computed for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayRow {
    /// 1..N in filtered order; display only, not a stable identity
    pub index: u32,
    /// 1-based position in the loaded record set
    pub source_pos: u32,
    pub record: SheetRecord,
    pub classification: Classification,
}
