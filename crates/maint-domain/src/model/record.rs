//! Sheet record and semantic column resolution

use serde::{Deserialize, Serialize};

/// One row of the maintenance sheet: header name → cell value, in
/// header order. The column set comes from the source header row and is
/// not fixed a priori, so lookups go by name rather than position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRecord {
    fields: Vec<(String, String)>,
}

impl SheetRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Column names in sheet order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Cell values in sheet order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// Exact-name lookup. Missing columns read as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed value, with empty cells collapsed to None
    pub fn get_trimmed(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Overwrite a cell by column name; appends the column if the row
    /// was short and never carried it.
    pub fn set(&mut self, column: &str, value: String) {
        if let Some(entry) = self.fields.iter_mut().find(|(k, _)| k == column) {
            entry.1 = value;
        } else {
            self.fields.push((column.to_string(), value));
        }
    }

    /// Case-insensitive substring search across all cell values
    pub fn any_value_contains(&self, needle_lower: &str) -> bool {
        self.fields
            .iter()
            .any(|(_, v)| v.to_lowercase().contains(needle_lower))
    }
}

/// Match strings used to locate the semantic columns in the header.
/// The vehicle column is matched exactly; the rest by case-insensitive
/// substring, first header match winning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMatchConfig {
    #[serde(default = "default_vehicle_column")]
    pub vehicle: String,
    #[serde(default = "default_date_out_match")]
    pub date_out: String,
    #[serde(default = "default_date_in_match")]
    pub date_in: String,
    #[serde(default = "default_damage_match")]
    pub damage: String,
}

fn default_vehicle_column() -> String {
    "Vehicle".to_string()
}

fn default_date_out_match() -> String {
    "date out".to_string()
}

fn default_date_in_match() -> String {
    "date in".to_string()
}

fn default_damage_match() -> String {
    "damag".to_string()
}

impl Default for ColumnMatchConfig {
    fn default() -> Self {
        Self {
            vehicle: default_vehicle_column(),
            date_out: default_date_out_match(),
            date_in: default_date_in_match(),
            damage: default_damage_match(),
        }
    }
}

/// Semantic columns resolved once per loaded record set, replacing the
/// original per-access header scans. An unresolved column stays None and
/// every downstream read treats the field as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMap {
    pub vehicle: Option<String>,
    pub date_out: Option<String>,
    pub date_in: Option<String>,
    pub damage: Option<String>,
}

impl ColumnMap {
    /// Resolve semantic columns against a header row. Unmatched columns
    /// are reported as warnings, never as failures.
    pub fn resolve<S: AsRef<str>>(headers: &[S], config: &ColumnMatchConfig) -> Self {
        let vehicle = headers
            .iter()
            .map(|h| h.as_ref())
            .find(|h| *h == config.vehicle)
            .map(str::to_string);
        let map = Self {
            vehicle,
            date_out: find_by_substring(headers, &config.date_out),
            date_in: find_by_substring(headers, &config.date_in),
            damage: find_by_substring(headers, &config.damage),
        };
        for (name, col) in [
            (config.vehicle.as_str(), &map.vehicle),
            (config.date_out.as_str(), &map.date_out),
            (config.date_in.as_str(), &map.date_in),
            (config.damage.as_str(), &map.damage),
        ] {
            if col.is_none() {
                eprintln!("Warning: no column matching '{}' in header", name);
            }
        }
        map
    }

    /// Resolve from the first record of a loaded set
    pub fn from_records(records: &[SheetRecord], config: &ColumnMatchConfig) -> Self {
        match records.first() {
            Some(first) => {
                let headers: Vec<&str> = first.columns().collect();
                Self::resolve(&headers, config)
            }
            None => Self::default(),
        }
    }

    pub fn vehicle_value<'a>(&self, record: &'a SheetRecord) -> Option<&'a str> {
        self.vehicle.as_deref().and_then(|c| record.get(c))
    }

    pub fn date_out_value<'a>(&self, record: &'a SheetRecord) -> Option<&'a str> {
        self.date_out.as_deref().and_then(|c| record.get_trimmed(c))
    }

    pub fn date_in_value<'a>(&self, record: &'a SheetRecord) -> Option<&'a str> {
        self.date_in.as_deref().and_then(|c| record.get_trimmed(c))
    }

    pub fn damage_value<'a>(&self, record: &'a SheetRecord) -> Option<&'a str> {
        self.damage.as_deref().and_then(|c| record.get_trimmed(c))
    }

    /// Lowercased damage text, for keyword checks
    pub fn damage_lower(&self, record: &SheetRecord) -> Option<String> {
        self.damage_value(record).map(str::to_lowercase)
    }

    /// A row is resolved once its date-in cell is filled
    pub fn has_date_in(&self, record: &SheetRecord) -> bool {
        self.date_in_value(record).is_some()
    }
}

fn find_by_substring<S: AsRef<str>>(headers: &[S], needle: &str) -> Option<String> {
    let needle = needle.to_lowercase();
    headers
        .iter()
        .map(|h| h.as_ref())
        .find(|h| h.to_lowercase().contains(&needle))
        .map(str::to_string)
}
