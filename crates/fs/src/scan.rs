use std::{
    cmp::Ordering,
    ffi::OsStr,
    fs::{self, read_dir},
    path::Path,
};

use log::{debug, warn};

use crate::{
    config::INITIAL_CAPACITY,
    error::ScanError,
    order::{OrderingPolicy, sort_records},
    record::DirEntryRecord,
};

/// What to do when one entry cannot be read or stat'ed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataPolicy {
    /// Log the failure, skip the entry, keep going.
    #[default]
    Lenient,
    /// Fail the whole scan and discard everything collected so far.
    Strict,
}

impl MetadataPolicy {
    pub(crate) fn tolerate(self, err: ScanError) -> Result<(), ScanError> {
        match self {
            MetadataPolicy::Lenient => {
                warn!("[scan] skipping entry: {err}");
                Ok(())
            }
            MetadataPolicy::Strict => Err(err),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub metadata_policy: MetadataPolicy,

    /// Also report `.` and `..`, as raw `readdir` does.
    /// `std::fs::read_dir` never yields them on its own.
    pub include_dot_entries: bool,
}

impl ScanOptions {
    pub fn strict() -> Self {
        ScanOptions {
            metadata_policy: MetadataPolicy::Strict,
            ..ScanOptions::default()
        }
    }
}

/// List `path` with default (lenient) options, sorted by `policy`.
pub fn scan_directory<P: AsRef<Path>>(
    path: P,
    policy: OrderingPolicy,
) -> Result<Vec<DirEntryRecord>, ScanError> {
    scan_directory_with(path, &ScanOptions::default(), |a, b| policy.compare(a, b))
}

/// List `path`, stat every entry, and sort the result with `compare`.
///
/// The whole directory is read before sorting. Entries are stat'ed through
/// symlinks, so a link reports the kind, size and times of its target.
/// The returned vector is owned by the caller; its `len()` is the entry count.
pub fn scan_directory_with<P, F>(
    path: P,
    opts: &ScanOptions,
    compare: F,
) -> Result<Vec<DirEntryRecord>, ScanError>
where
    P: AsRef<Path>,
    F: FnMut(&DirEntryRecord, &DirEntryRecord) -> Ordering,
{
    let dir = path.as_ref();
    debug!("[scan] listing {:?} ({:?})", dir, opts.metadata_policy);

    let mut records = collect_entries(dir, opts)?;
    sort_records(&mut records, compare);

    debug!("[scan] {:?}: {} entries", dir, records.len());
    Ok(records)
}

fn collect_entries(dir: &Path, opts: &ScanOptions) -> Result<Vec<DirEntryRecord>, ScanError> {
    // `ReadDir` closes the handle when dropped, on every return path below.
    let rd = read_dir(dir).map_err(|e| ScanError::open_failed(dir.to_path_buf(), e))?;

    let mut records = Vec::new();
    records
        .try_reserve(INITIAL_CAPACITY)
        .map_err(|source| ScanError::AllocationFailed {
            requested: INITIAL_CAPACITY,
            source,
        })?;

    if opts.include_dot_entries {
        for name in [".", ".."] {
            push_entry(dir, OsStr::new(name), opts, &mut records)?;
        }
    }

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(source) => {
                opts.metadata_policy.tolerate(ScanError::EntryReadFailed {
                    dir: dir.to_path_buf(),
                    source,
                })?;
                continue;
            }
        };

        push_entry(dir, &entry.file_name(), opts, &mut records)?;
    }

    Ok(records)
}

fn push_entry(
    dir: &Path,
    name: &OsStr,
    opts: &ScanOptions,
    records: &mut Vec<DirEntryRecord>,
) -> Result<(), ScanError> {
    let full_path = dir.join(name);

    // stat, not lstat: `DirEntry::metadata` would not follow links.
    let metadata = match fs::metadata(&full_path) {
        Ok(m) => m,
        Err(source) => {
            return opts.metadata_policy.tolerate(ScanError::MetadataFailed {
                path: full_path,
                source,
            });
        }
    };

    let record = DirEntryRecord::from_metadata(name, &metadata);
    if !record.name_flags.is_empty() {
        warn!(
            "[scan] name anomaly {:?} in {:?}: stored as {:?}",
            record.name_flags, dir, record.name
        );
    }

    // Amortized growth; only fails when the allocator does.
    records
        .try_reserve(1)
        .map_err(|source| ScanError::AllocationFailed {
            requested: records.len() + 1,
            source,
        })?;
    records.push(record);

    Ok(())
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
