mod config;
mod error;
mod order;
mod record;
mod scan;

pub use config::NAME_MAX;
pub use error::{OpenFailure, ScanError};
pub use order::{
    Direction, OrderingPolicy, ParsePolicyError, SortKey, cmp_name_ignore_ascii_case,
    sort_records,
};
pub use record::{DirEntryRecord, EntryKind, NameFlags, bounded_name};
pub use scan::{MetadataPolicy, ScanOptions, scan_directory, scan_directory_with};
