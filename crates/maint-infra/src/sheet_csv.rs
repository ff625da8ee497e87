//! CSV loaders for the maintenance sheet and the reference plate list

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use maint_domain::model::SheetRecord;
use maint_domain::repository::{PlateListSource, SheetSource};
use maint_domain::service::normalize_plate;
use maint_types::{Error, Result};

/// Parse a CSV blob with a header row into records. Rows with the wrong
/// field count are tolerated: short rows simply lack the trailing
/// columns, and extra cells beyond the header are dropped.
pub fn parse_sheet_text(text: &str) -> Result<(Vec<String>, Vec<SheetRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::SheetLoad(format!("Failed to read header row: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(Error::SheetLoad("Sheet is empty".to_string()));
    }
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::SheetLoad(format!("Failed to read row: {}", e)))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let fields: Vec<(String, String)> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        records.push(SheetRecord::new(fields));
    }
    Ok((headers, records))
}

/// Maintenance sheet stored as a local CSV export
#[derive(Debug, Clone)]
pub struct CsvSheetSource {
    path: PathBuf,
}

impl CsvSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for CsvSheetSource {
    fn load(&self) -> Result<Vec<SheetRecord>> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let (_, records) = parse_sheet_text(&content)?;
        Ok(records)
    }
}

/// Invygo reference plates: first column of a CSV, header skipped,
/// values normalized for comparison.
#[derive(Debug, Clone)]
pub struct CsvPlateListSource {
    path: PathBuf,
}

impl CsvPlateListSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlateListSource for CsvPlateListSource {
    fn load(&self) -> Result<HashSet<String>> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut plates = HashSet::new();
        for row in reader.records() {
            let row = row.map_err(|e| Error::SheetLoad(format!("Failed to read row: {}", e)))?;
            if let Some(cell) = row.get(0) {
                let plate = normalize_plate(cell);
                if !plate.is_empty() {
                    plates.insert(plate);
                }
            }
        }
        Ok(plates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_sheet_with_header() {
        let text = "Vehicle,Date OUT,Date IN,Damage\nABC 123,01/01/2024,,scratch\nXYZ 9,02/01/2024,05/01/2024,\n";
        let (headers, records) = parse_sheet_text(text).unwrap();
        assert_eq!(headers, vec!["Vehicle", "Date OUT", "Date IN", "Damage"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Vehicle"), Some("ABC 123"));
        assert_eq!(records[1].get("Date IN"), Some("05/01/2024"));
    }

    #[test]
    fn test_short_rows_read_as_absent_fields() {
        let text = "Vehicle,Date OUT,Date IN\nABC 123,01/01/2024\n";
        let (_, records) = parse_sheet_text(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Vehicle"), Some("ABC 123"));
        assert!(records[0].get("Date IN").is_none());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "Vehicle,Date OUT\nABC 123,01/01/2024\n,\nXYZ 9,02/01/2024\n";
        let (_, records) = parse_sheet_text(text).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_sheet_source_missing_file() {
        let source = CsvSheetSource::new("/nonexistent/sheet.csv");
        assert!(matches!(source.load(), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_plate_list_normalized() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Plate,Model").unwrap();
        writeln!(file, "F 62443,Corolla").unwrap();
        writeln!(file, "aa15916,Sunny").unwrap();
        writeln!(file, ",").unwrap();
        let plates = CsvPlateListSource::new(file.path()).load().unwrap();
        assert!(plates.contains("f62443"));
        assert!(plates.contains("aa15916"));
        assert_eq!(plates.len(), 2);
    }
}
