//! Collaborator trait definitions

use std::collections::HashSet;

use crate::model::SheetRecord;
use maint_types::Error;

/// Source of the maintenance sheet records
pub trait SheetSource {
    /// Load all records. A fetch failure is a single error; no retry,
    /// no partial data.
    fn load(&self) -> Result<Vec<SheetRecord>, Error>;
}

/// Source of the Invygo reference plate list, normalized
pub trait PlateListSource {
    fn load(&self) -> Result<HashSet<String>, Error>;
}

/// Write-through sink for single-cell edits. Failures surface to the
/// caller; the in-memory edit is not rolled back.
pub trait CellWriter {
    /// `row` is the 1-based source position of the record
    fn write_cell(&self, row: u32, column: &str, value: &str) -> Result<(), Error>;
}
