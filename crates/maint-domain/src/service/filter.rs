//! Filter/query engine over classified rows

use serde::{Deserialize, Serialize};

use crate::model::{Classification, DisplayRow, SheetRecord};
use crate::service::classifier::{classify_record, ClassifyContext};
use crate::service::plate::normalize_plate;
use maint_types::FilterMode;

/// Placeholder the sheet writes for unresolved lookups
const NA_CELL: &str = "#N/A";

/// Filter behavior toggles. The two sheet variants disagreed on how
/// search interacts with the mode filter and on what "not ready" needs;
/// both variants survive here as configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// When true, a non-empty search ignores the mode filter entirely
    #[serde(default)]
    pub search_overrides_filter: bool,
    /// When true, "notready" also requires a date-out and non-total-loss damage
    #[serde(default)]
    pub not_ready_requires_date_out: bool,
}

/// Classify and filter the record set, reassigning display indices
/// 1..N in filtered order.
pub fn apply_filter(
    records: &[SheetRecord],
    mode: FilterMode,
    search: &str,
    ctx: &ClassifyContext,
    opts: &FilterOptions,
) -> Vec<DisplayRow> {
    let search_lower = search.trim().to_lowercase();
    let mut visible = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        let source_pos = idx as u32 + 1;
        let classification = classify_record(record, source_pos, ctx);
        let matches_search = search_lower.is_empty() || record.any_value_contains(&search_lower);
        let keep = if opts.search_overrides_filter && !search_lower.is_empty() {
            matches_search
        } else {
            matches_search && matches_mode(record, &classification, mode, ctx, opts)
        };
        if keep {
            visible.push(DisplayRow {
                index: 0,
                source_pos,
                record: record.clone(),
                classification,
            });
        }
    }
    for (i, row) in visible.iter_mut().enumerate() {
        row.index = i as u32 + 1;
    }
    visible
}

fn matches_mode(
    record: &SheetRecord,
    classification: &Classification,
    mode: FilterMode,
    ctx: &ClassifyContext,
    opts: &FilterOptions,
) -> bool {
    let columns = ctx.columns;
    let has_date_in = columns.has_date_in(record);
    let damage_lower = columns.damage_lower(record).unwrap_or_default();
    let plate = columns
        .vehicle_value(record)
        .map(normalize_plate)
        .unwrap_or_default();

    match mode {
        FilterMode::All => {
            let vehicle = columns.vehicle_value(record).map(str::trim).unwrap_or("");
            if vehicle.is_empty() || vehicle == NA_CELL {
                return false;
            }
            // at least one populated field besides the vehicle
            record
                .columns()
                .zip(record.values())
                .filter(|(k, _)| Some(*k) != columns.vehicle.as_deref())
                .any(|(_, v)| {
                    let v = v.trim();
                    !v.is_empty() && v != NA_CELL
                })
        }
        FilterMode::Accident => damage_lower.contains("accident") && !has_date_in,
        FilterMode::Invygo => {
            !plate.is_empty() && ctx.invygo_plates.contains(&plate) && !has_date_in
        }
        FilterMode::Ready => has_date_in,
        FilterMode::NotReady => {
            if has_date_in {
                return false;
            }
            if opts.not_ready_requires_date_out {
                columns.date_out_value(record).is_some() && !damage_lower.contains("total loss")
            } else {
                true
            }
        }
        FilterMode::Duplicates => {
            !plate.is_empty() && ctx.duplicates.is_duplicate(&plate) && !has_date_in
        }
        FilterMode::Delayed => classification.days_delayed.is_some(),
        FilterMode::TotalLoss => record.any_value_contains("total loss"),
    }
}

/// Per-category counts shown in the summary report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub total: usize,
    pub accident: usize,
    pub invygo: usize,
    pub ready: usize,
    pub not_ready: usize,
    pub duplicates: usize,
    pub delayed: usize,
    pub total_loss: usize,
}

pub fn count_by_mode(
    records: &[SheetRecord],
    ctx: &ClassifyContext,
    opts: &FilterOptions,
) -> SummaryCounts {
    let count = |mode| apply_filter(records, mode, "", ctx, opts).len();
    SummaryCounts {
        total: records.len(),
        accident: count(FilterMode::Accident),
        invygo: count(FilterMode::Invygo),
        ready: count(FilterMode::Ready),
        not_ready: count(FilterMode::NotReady),
        duplicates: count(FilterMode::Duplicates),
        delayed: count(FilterMode::Delayed),
        total_loss: count(FilterMode::TotalLoss),
    }
}
