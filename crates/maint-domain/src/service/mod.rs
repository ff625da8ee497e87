//! Domain services - pure classification and query logic

pub mod classifier;
pub mod dates;
pub mod duplicates;
pub mod filter;
pub mod plate;
pub mod report;

pub use classifier::{classify_record, ClassifyContext, DelayRules};
pub use dates::parse_flexible_date;
pub use duplicates::{detect_duplicates, DuplicateIndex};
pub use filter::{apply_filter, count_by_mode, FilterOptions};
pub use plate::normalize_plate;
pub use report::generate_maintenance_report;
