//! CSV write-back for single-cell edits

use std::path::PathBuf;

use maint_domain::repository::CellWriter;
use maint_types::{Error, Result};

use crate::sheet_csv::parse_sheet_text;

/// Persists single-cell edits by rewriting the sheet CSV in place.
/// Callers apply the edit to their in-memory state first; a write
/// failure here is surfaced but does not roll that state back.
#[derive(Debug, Clone)]
pub struct CsvCellWriter {
    path: PathBuf,
}

impl CsvCellWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CellWriter for CsvCellWriter {
    fn write_cell(&self, row: u32, column: &str, value: &str) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let (headers, mut records) = parse_sheet_text(&content)?;
        if !headers.iter().any(|h| h == column) {
            return Err(Error::InvalidCell(format!("unknown column '{}'", column)));
        }
        let idx = (row as usize)
            .checked_sub(1)
            .filter(|i| *i < records.len())
            .ok_or_else(|| Error::InvalidCell(format!("row {} out of range", row)))?;
        records[idx].set(column, value.to_string());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&headers)
            .map_err(|e| Error::WriteBack(e.to_string()))?;
        for record in &records {
            let cells: Vec<&str> = headers
                .iter()
                .map(|h| record.get(h).unwrap_or(""))
                .collect();
            writer
                .write_record(&cells)
                .map_err(|e| Error::WriteBack(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::WriteBack(e.to_string()))?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}
