//! Row classification: delay accounting, repair status, note text

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Classification, ColumnMap, SheetRecord};
use crate::service::dates::parse_flexible_date;
use crate::service::duplicates::DuplicateIndex;
use crate::service::plate::normalize_plate;
use maint_types::{CarType, RepairStatus};

/// Delay thresholds per damage keyword. The sheet variants drifted on
/// these rules, so they are configuration rather than code paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayRules {
    /// Days allowed when damage text contains "accident"
    #[serde(default = "default_accident_days")]
    pub accident_days: i64,
    /// Days allowed when damage text contains "oil"
    #[serde(default = "default_oil_days")]
    pub oil_days: i64,
    /// Days allowed when no keyword matches
    #[serde(default = "default_days")]
    pub default_days: i64,
}

fn default_accident_days() -> i64 {
    30
}

fn default_oil_days() -> i64 {
    3
}

fn default_days() -> i64 {
    3
}

impl Default for DelayRules {
    fn default() -> Self {
        Self {
            accident_days: default_accident_days(),
            oil_days: default_oil_days(),
            default_days: default_days(),
        }
    }
}

impl DelayRules {
    /// Threshold for a lowercased damage text. When several keywords
    /// match, the largest threshold applies.
    pub fn threshold_for(&self, damage_lower: &str) -> i64 {
        let mut required = Vec::new();
        if damage_lower.contains("oil") {
            required.push(self.oil_days);
        }
        if damage_lower.contains("accident") {
            required.push(self.accident_days);
        }
        required.into_iter().max().unwrap_or(self.default_days)
    }
}

/// Everything classification needs beyond the row itself. `today` is
/// injected so delay math stays deterministic under test.
#[derive(Debug, Clone)]
pub struct ClassifyContext<'a> {
    pub columns: &'a ColumnMap,
    pub duplicates: &'a DuplicateIndex,
    pub invygo_plates: &'a HashSet<String>,
    pub today: NaiveDate,
    pub rules: &'a DelayRules,
}

/// Classify one record. `source_pos` is the 1-based position in the
/// loaded set, matching the positions stored by the duplicate index.
pub fn classify_record(
    record: &SheetRecord,
    source_pos: u32,
    ctx: &ClassifyContext,
) -> Classification {
    let plate = ctx
        .columns
        .vehicle_value(record)
        .map(normalize_plate)
        .unwrap_or_default();
    let has_date_in = ctx.columns.has_date_in(record);
    let damage_lower = ctx.columns.damage_lower(record).unwrap_or_default();

    let days_delayed = compute_days_delayed(record, has_date_in, &damage_lower, ctx);

    let repair_status = if days_delayed.is_some() {
        RepairStatus::Delayed
    } else if damage_lower.contains("accident") && !has_date_in {
        RepairStatus::Accident
    } else if has_date_in {
        RepairStatus::Repaired
    } else {
        RepairStatus::NotRepaired
    };

    let car_type = if !plate.is_empty() && ctx.invygo_plates.contains(&plate) {
        CarType::Invygo
    } else {
        CarType::Other
    };

    let duplicate_rows: Vec<u32> = if !plate.is_empty() && ctx.duplicates.is_duplicate(&plate) && !has_date_in {
        ctx.duplicates
            .positions(&plate)
            .iter()
            .copied()
            .filter(|&p| p != source_pos)
            .collect()
    } else {
        Vec::new()
    };

    let mut note = format!("{} {}", car_type, repair_status);
    if !duplicate_rows.is_empty() {
        let positions: Vec<String> = duplicate_rows.iter().map(u32::to_string).collect();
        note.push_str(&format!(", Duplicate with rows: {}", positions.join(", ")));
    }

    Classification {
        days_delayed,
        car_type,
        repair_status,
        duplicate_rows,
        note,
    }
}

/// Delay is only accounted for unresolved rows with a parseable
/// date-out; "total loss" damage exempts the row entirely.
fn compute_days_delayed(
    record: &SheetRecord,
    has_date_in: bool,
    damage_lower: &str,
    ctx: &ClassifyContext,
) -> Option<i64> {
    if has_date_in {
        return None;
    }
    let date_out = parse_flexible_date(ctx.columns.date_out_value(record)?)?;
    if damage_lower.contains("total loss") {
        return None;
    }
    let elapsed = (ctx.today - date_out).num_days();
    let threshold = ctx.rules.threshold_for(damage_lower);
    if elapsed > threshold {
        Some(elapsed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnMatchConfig;
    use crate::service::duplicates::detect_duplicates;

    fn record(vehicle: &str, date_out: &str, date_in: &str, damage: &str) -> SheetRecord {
        SheetRecord::new(vec![
            ("Vehicle".to_string(), vehicle.to_string()),
            ("Date OUT".to_string(), date_out.to_string()),
            ("Date IN".to_string(), date_in.to_string()),
            ("Damage".to_string(), damage.to_string()),
        ])
    }

    fn columns() -> ColumnMap {
        ColumnMap::resolve(
            &["Vehicle", "Date OUT", "Date IN", "Damage"],
            &ColumnMatchConfig::default(),
        )
    }

    fn classify_one(row: SheetRecord, today: (i32, u32, u32)) -> Classification {
        let records = vec![row];
        classify_set(&records, today).remove(0)
    }

    fn classify_set(records: &[SheetRecord], today: (i32, u32, u32)) -> Vec<Classification> {
        let columns = columns();
        let duplicates = detect_duplicates(records, &columns);
        let invygo: HashSet<String> = ["f62443".to_string()].into_iter().collect();
        let rules = DelayRules::default();
        let ctx = ClassifyContext {
            columns: &columns,
            duplicates: &duplicates,
            invygo_plates: &invygo,
            today: NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap(),
            rules: &rules,
        };
        records
            .iter()
            .enumerate()
            .map(|(i, r)| classify_record(r, i as u32 + 1, &ctx))
            .collect()
    }

    #[test]
    fn test_accident_within_threshold_not_delayed() {
        // 14 elapsed days against the 30-day accident threshold
        let c = classify_one(
            record("abc 123", "01/01/2024", "", "Accident, minor"),
            (2024, 1, 15),
        );
        assert!(c.days_delayed.is_none());
        assert_eq!(c.repair_status, RepairStatus::Accident);
    }

    #[test]
    fn test_default_threshold_exceeded() {
        // 9 elapsed days, no keyword, threshold 3
        let c = classify_one(record("abc 123", "01/01/2024", "", ""), (2024, 1, 10));
        assert_eq!(c.days_delayed, Some(9));
        assert_eq!(c.repair_status, RepairStatus::Delayed);
        assert_eq!(c.note, "Other Delayed");
    }

    #[test]
    fn test_total_loss_exemption_wins() {
        // 60 days out, still exempt
        let c = classify_one(
            record("abc 123", "01/01/2024", "", "Total Loss after accident"),
            (2024, 3, 1),
        );
        assert!(c.days_delayed.is_none());
        assert_eq!(c.repair_status, RepairStatus::Accident);
    }

    #[test]
    fn test_date_in_never_delayed() {
        let c = classify_one(
            record("abc 123", "01/01/2024", "05/01/2024", "accident"),
            (2024, 6, 1),
        );
        assert!(c.days_delayed.is_none());
        assert_eq!(c.repair_status, RepairStatus::Repaired);
    }

    #[test]
    fn test_unparseable_date_out_skips_delay() {
        let c = classify_one(record("abc 123", "soon", "", ""), (2024, 6, 1));
        assert!(c.days_delayed.is_none());
        assert_eq!(c.repair_status, RepairStatus::NotRepaired);
    }

    #[test]
    fn test_multiple_keywords_use_max_threshold() {
        let rules = DelayRules::default();
        assert_eq!(rules.threshold_for("oil leak after accident"), 30);
        assert_eq!(rules.threshold_for("oil change"), 3);
        assert_eq!(rules.threshold_for("scratched door"), 3);
    }

    #[test]
    fn test_invygo_membership() {
        let c = classify_one(record("F 62443", "", "01/02/2024", ""), (2024, 2, 2));
        assert_eq!(c.car_type, CarType::Invygo);
        assert_eq!(c.note, "Invygo Repaired");
    }

    #[test]
    fn test_duplicate_note_excludes_own_row() {
        let records = vec![
            record("ABC 123", "01/01/2024", "", ""),
            record("xyz 9", "", "", ""),
            record("abc123", "02/01/2024", "", ""),
        ];
        let results = classify_set(&records, (2024, 1, 2));
        assert_eq!(results[0].duplicate_rows, vec![3]);
        assert!(results[0].note.ends_with("Duplicate with rows: 3"));
        assert_eq!(results[2].duplicate_rows, vec![1]);
        assert!(results[1].duplicate_rows.is_empty());
    }

    #[test]
    fn test_checked_in_row_gets_no_duplicate_note() {
        let records = vec![
            record("abc123", "01/01/2024", "03/01/2024", ""),
            record("abc123", "02/01/2024", "", ""),
        ];
        let results = classify_set(&records, (2024, 1, 2));
        assert!(results[0].duplicate_rows.is_empty());
        assert!(results[1].duplicate_rows.is_empty());
    }
}
