//! Text summary report for the maintenance sheet

use crate::model::SheetRecord;
use crate::service::classifier::ClassifyContext;
use crate::service::filter::{apply_filter, count_by_mode, FilterOptions};
use maint_types::FilterMode;

pub fn generate_maintenance_report(
    records: &[SheetRecord],
    ctx: &ClassifyContext,
    opts: &FilterOptions,
) -> String {
    let counts = count_by_mode(records, ctx, opts);
    let delayed = apply_filter(records, FilterMode::Delayed, "", ctx, opts);

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("           Maintenance Sheet Report               \n");
    report.push_str("==================================================\n\n");
    report.push_str("Summary\n");
    report.push_str(&format!("  Total rows:        {}\n", counts.total));
    report.push_str(&format!("  Ready:             {}\n", counts.ready));
    report.push_str(&format!("  Not ready:         {}\n", counts.not_ready));
    report.push_str(&format!("  Accident:          {}\n", counts.accident));
    report.push_str(&format!("  Invygo pending:    {}\n", counts.invygo));
    report.push_str(&format!("  Duplicates:        {}\n", counts.duplicates));
    report.push_str(&format!("  Total loss:        {}\n", counts.total_loss));
    report.push_str(&format!("  Delayed:           {}\n", counts.delayed));
    report.push('\n');

    if delayed.is_empty() {
        report.push_str("No Delayed Vehicles\n");
        report.push_str("  All unresolved rows are within their allowed days.\n\n");
    } else {
        report.push_str("Delayed Vehicles\n");
        report.push_str("-".repeat(66).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<4} {:<14} {:<12} {:<24} {:>8}\n",
            "Row", "Vehicle", "Date Out", "Damage", "Days"
        ));
        report.push_str("-".repeat(66).as_str());
        report.push('\n');
        for row in &delayed {
            let vehicle = ctx.columns.vehicle_value(&row.record).unwrap_or("");
            let date_out = ctx.columns.date_out_value(&row.record).unwrap_or("");
            let damage = ctx.columns.damage_value(&row.record).unwrap_or("");
            let days = row.classification.days_delayed.unwrap_or(0);
            report.push_str(&format!(
                "{:<4} {:<14} {:<12} {:<24} {:>8}\n",
                row.source_pos,
                truncate_str(vehicle, 13),
                truncate_str(date_out, 11),
                truncate_str(damage, 23),
                days
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
