use std::{collections::TryReserveError, io, path::PathBuf};

use thiserror::Error;

/// Why the directory itself could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFailure {
    NotFound,
    NotADirectory,
    PermissionDenied,
    Other,
}

impl OpenFailure {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => OpenFailure::NotFound,
            io::ErrorKind::NotADirectory => OpenFailure::NotADirectory,
            io::ErrorKind::PermissionDenied => OpenFailure::PermissionDenied,
            _ => OpenFailure::Other,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            OpenFailure::NotFound => "not found",
            OpenFailure::NotADirectory => "not a directory",
            OpenFailure::PermissionDenied => "permission denied",
            OpenFailure::Other => "open failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open directory {}: {}", .path.display(), .reason.describe())]
    DirectoryOpenFailed {
        path: PathBuf,
        reason: OpenFailure,
        #[source]
        source: io::Error,
    },

    #[error("cannot read entry in {}: {source}", .dir.display())]
    EntryReadFailed {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot stat {}: {source}", .path.display())]
    MetadataFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot grow listing past {requested} entries: {source}")]
    AllocationFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

impl ScanError {
    pub(crate) fn open_failed(path: PathBuf, source: io::Error) -> Self {
        ScanError::DirectoryOpenFailed {
            path,
            reason: OpenFailure::from_io(&source),
            source,
        }
    }

    pub fn is_open_failure(&self) -> bool {
        matches!(self, ScanError::DirectoryOpenFailed { .. })
    }

    pub fn open_failure(&self) -> Option<OpenFailure> {
        match self {
            ScanError::DirectoryOpenFailed { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
