use std::{ffi::OsStr, fs::Metadata};

use bitflags::bitflags;
use serde::Serialize;

use crate::config::{BYTES_PER_MIB, NAME_MAX};

bitflags! {
    /// Anomalies found while turning an OS file name into a record name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NameFlags: u8 {
        /// The OS name was not valid UTF-8; invalid sequences became U+FFFD.
        const LOSSY     = 0b0000_0001;
        /// The name was longer than `NAME_MAX` bytes and was cut short.
        const TRUNCATED = 0b0000_0010;
    }
}

impl Serialize for NameFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
    /// Sockets, fifos, block and character devices.
    Other,
}

impl EntryKind {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let ft = metadata.file_type();
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// One directory entry and the metadata `stat` reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntryRecord {
    /// Base name, never longer than `NAME_MAX` bytes
    pub name: String,
    pub name_flags: NameFlags,
    pub kind: EntryKind,
    /// Raw `st_mode` on unix; elsewhere only the type bits are synthesized
    pub mode: u32,
    /// Size in bytes as reported by metadata, directories included
    pub size: u64,
    /// Last access, seconds since the Unix epoch
    pub atime_secs: i64,
    /// Last modification, seconds since the Unix epoch
    pub mtime_secs: i64,
    /// Last status change on unix, creation time elsewhere
    pub ctime_secs: i64,
}

impl DirEntryRecord {
    pub fn from_metadata(os_name: &OsStr, metadata: &Metadata) -> Self {
        let (name, name_flags) = bounded_name(os_name);
        let times = EntryTimes::from_metadata(metadata);

        DirEntryRecord {
            name,
            name_flags,
            kind: EntryKind::from_metadata(metadata),
            mode: mode_bits(metadata),
            size: metadata.len(),
            atime_secs: times.atime,
            mtime_secs: times.mtime,
            ctime_secs: times.ctime,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// `d` for directories, `f` for everything else.
    pub fn type_char(&self) -> char {
        if self.is_dir() { 'd' } else { 'f' }
    }

    pub fn size_mib(&self) -> f64 {
        self.size as f64 / BYTES_PER_MIB
    }
}

/// Convert an OS name into a bounds-safe `String`.
///
/// Invalid UTF-8 is replaced lossily and flagged. A result longer than
/// `NAME_MAX` bytes (possible after replacement widens invalid bytes) is cut
/// at the last char boundary that fits and flagged.
pub fn bounded_name(os_name: &OsStr) -> (String, NameFlags) {
    let mut flags = NameFlags::empty();

    let mut name = match os_name.to_str() {
        Some(s) => s.to_owned(),
        None => {
            flags |= NameFlags::LOSSY;
            os_name.to_string_lossy().into_owned()
        }
    };

    if name.len() > NAME_MAX {
        let mut cut = NAME_MAX;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
        flags |= NameFlags::TRUNCATED;
    }

    (name, flags)
}

struct EntryTimes {
    atime: i64,
    mtime: i64,
    ctime: i64,
}

impl EntryTimes {
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        EntryTimes {
            atime: metadata.atime(),
            mtime: metadata.mtime(),
            ctime: metadata.ctime(),
        }
    }

    // No status-change time outside unix; creation time is the closest
    // thing, and 0 stands in wherever the platform reports nothing.
    #[cfg(not(unix))]
    fn from_metadata(metadata: &Metadata) -> Self {
        EntryTimes {
            atime: to_unix_secs(metadata.accessed().ok()),
            mtime: to_unix_secs(metadata.modified().ok()),
            ctime: to_unix_secs(metadata.created().ok()),
        }
    }
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    const S_IFDIR: u32 = 0o040000;
    const S_IFREG: u32 = 0o100000;

    match EntryKind::from_metadata(metadata) {
        EntryKind::Directory => S_IFDIR,
        EntryKind::File => S_IFREG,
        EntryKind::Other => 0,
    }
}

/// Seconds since the epoch, negative for times before it, 0 when unknown.
#[cfg(any(not(unix), test))]
pub(crate) fn to_unix_secs(t: Option<std::time::SystemTime>) -> i64 {
    use std::time::UNIX_EPOCH;

    match t {
        None => 0,
        Some(t) => match t.duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
            Err(e) => i64::try_from(e.duration().as_secs())
                .map(|s| -s)
                .unwrap_or(i64::MIN),
        },
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
