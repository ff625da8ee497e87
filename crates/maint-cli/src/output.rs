//! Output formatting module

use maint_domain::model::{ColumnMap, DisplayRow};
use maint_types::{OutputFormat, Result};

pub fn output_rows(
    output_format: OutputFormat,
    rows: &[DisplayRow],
    columns: &ColumnMap,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(rows)?;
        println!("{}", content);
        return Ok(());
    }

    // Table format
    println!("\nShowing {} result(s)", rows.len());
    if rows.is_empty() {
        println!("No results match the filter or search.");
        return Ok(());
    }
    println!(
        "{:<6} {:<14} {:<12} {:<12} {:<20} {:>6}  {}",
        "Index", "Vehicle", "Date Out", "Date In", "Damage", "Days", "Note"
    );
    println!("{}", "-".repeat(100));
    for row in rows {
        let vehicle = columns.vehicle_value(&row.record).unwrap_or("");
        let date_out = columns.date_out_value(&row.record).unwrap_or("");
        let date_in = columns.date_in_value(&row.record).unwrap_or("");
        let damage = columns.damage_value(&row.record).unwrap_or("");
        let days = row
            .classification
            .days_delayed
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "{:<6} {:<14} {:<12} {:<12} {:<20} {:>6}  {}",
            row.index,
            truncate(vehicle, 13),
            truncate(date_out, 11),
            truncate(date_in, 11),
            truncate(damage, 19),
            days,
            row.classification.note
        );
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let cut: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", cut)
    } else {
        s.to_string()
    }
}
