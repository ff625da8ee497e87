//! Domain model types

pub mod classification;
pub mod record;

pub use classification::{Classification, DisplayRow};
pub use record::{ColumnMap, ColumnMatchConfig, SheetRecord};
