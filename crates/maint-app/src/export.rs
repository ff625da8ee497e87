//! Export formatting and Excel output

use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};

use maint_domain::model::DisplayRow;
use maint_types::{Error, FilterMode, Result};

/// Columns synthesized by the export, not present in the source sheet
const INDEX_COL: &str = "Index";
const DAYS_DELAYED_COL: &str = "Days Delayed";
const NOTES_COL: &str = "Notes";

/// A flattened view ready for an export sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Build the export view: source columns that carry at least one
/// non-empty value across the visible set, bracketed by Index and
/// Days Delayed (always kept) plus the computed Notes.
pub fn prepare_export(rows: &[DisplayRow]) -> ExportSheet {
    let mut data_columns: Vec<String> = Vec::new();
    if let Some(first) = rows.first() {
        for column in first.record.columns() {
            let populated = rows
                .iter()
                .any(|r| r.record.get_trimmed(column).is_some());
            if populated {
                data_columns.push(column.to_string());
            }
        }
    }

    let mut headers = Vec::with_capacity(data_columns.len() + 3);
    headers.push(INDEX_COL.to_string());
    headers.extend(data_columns.iter().cloned());
    headers.push(DAYS_DELAYED_COL.to_string());
    headers.push(NOTES_COL.to_string());

    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(headers.len());
            cells.push(row.index.to_string());
            for column in &data_columns {
                cells.push(row.record.get(column).unwrap_or("").to_string());
            }
            cells.push(
                row.classification
                    .days_delayed
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            );
            cells.push(row.classification.note.clone());
            cells
        })
        .collect();

    ExportSheet { headers, rows }
}

/// File stem for the export, derived from the active view: a non-empty
/// search wins, otherwise the filter mode label.
pub fn export_file_stem(mode: FilterMode, search: &str) -> String {
    if search.trim().is_empty() {
        mode.label().to_string()
    } else {
        "search".to_string()
    }
}

/// Full export file name, e.g. "Delayed_2024-01-15.xlsx"
pub fn export_file_name(mode: FilterMode, search: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", export_file_stem(mode, search), date.format("%Y-%m-%d"))
}

/// Write the export view to an Excel workbook
pub fn export_to_excel(sheet: &ExportSheet, sheet_name: &str, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    for (row_idx, cells) in sheet.rows.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32 + 1, col as u16, value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    // Approximate widths: narrow index, wide notes
    worksheet
        .set_column_width(0, 8)
        .map_err(|e| Error::Excel(e.to_string()))?;
    if let Some(last) = sheet.headers.len().checked_sub(1) {
        worksheet
            .set_column_width(last as u16, 40)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maint_domain::model::{Classification, SheetRecord};
    use maint_types::{CarType, RepairStatus};

    fn display_row(index: u32, fields: &[(&str, &str)], days: Option<i64>, note: &str) -> DisplayRow {
        DisplayRow {
            index,
            source_pos: index,
            record: SheetRecord::new(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            classification: Classification {
                days_delayed: days,
                car_type: CarType::Other,
                repair_status: RepairStatus::NotRepaired,
                duplicate_rows: Vec::new(),
                note: note.to_string(),
            },
        }
    }

    #[test]
    fn test_empty_columns_stripped() {
        let rows = vec![
            display_row(1, &[("Vehicle", "a 1"), ("Remarks", "")], None, "Other Not Repaired"),
            display_row(2, &[("Vehicle", "b 2"), ("Remarks", " ")], None, "Other Not Repaired"),
        ];
        let sheet = prepare_export(&rows);
        assert_eq!(sheet.headers, vec!["Index", "Vehicle", "Days Delayed", "Notes"]);
        assert_eq!(sheet.rows[0], vec!["1", "a 1", "", "Other Not Repaired"]);
    }

    #[test]
    fn test_days_delayed_always_retained() {
        // no row carries a delay, column stays anyway
        let rows = vec![display_row(1, &[("Vehicle", "a 1")], None, "Other Not Repaired")];
        let sheet = prepare_export(&rows);
        assert!(sheet.headers.contains(&"Days Delayed".to_string()));

        let rows = vec![display_row(1, &[("Vehicle", "a 1")], Some(9), "Other Delayed")];
        let sheet = prepare_export(&rows);
        assert_eq!(sheet.rows[0][2], "9");
    }

    #[test]
    fn test_empty_set() {
        let sheet = prepare_export(&[]);
        assert_eq!(sheet.headers, vec!["Index", "Days Delayed", "Notes"]);
        assert!(sheet.rows.is_empty());
    }

    #[test]
    fn test_file_name_from_view() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            export_file_name(FilterMode::Delayed, "", date),
            "Delayed_2024-01-15.xlsx"
        );
        assert_eq!(
            export_file_name(FilterMode::All, "", date),
            "Maintenance_2024-01-15.xlsx"
        );
        assert_eq!(
            export_file_name(FilterMode::All, "abc", date),
            "search_2024-01-15.xlsx"
        );
    }

    #[test]
    fn test_workbook_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let rows = vec![display_row(1, &[("Vehicle", "a 1")], Some(4), "Other Delayed")];
        let sheet = prepare_export(&rows);
        export_to_excel(&sheet, "Maintenance", &path).unwrap();
        assert!(path.exists());
    }
}
