//! Infrastructure layer - CSV collaborator implementations

pub mod sheet_csv;
pub mod write_back;

pub use sheet_csv::{CsvPlateListSource, CsvSheetSource};
pub use write_back::CsvCellWriter;
