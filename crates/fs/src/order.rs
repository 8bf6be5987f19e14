use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::record::DirEntryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Base name, ASCII case-insensitive
    Name,
    /// Size in bytes
    Size,
    /// Modification time
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

/// The six built-in orderings a listing can be sorted by.
///
/// Every policy is a total order over records (ties compare `Equal`), so it
/// is safe to hand to any standard library sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderingPolicy {
    #[default]
    NameAsc,
    NameDesc,
    SizeAsc,
    SizeDesc,
    TimeAsc,
    TimeDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ordering policy `{0}` (expected name, size or time, optionally with -asc/-desc)")]
pub struct ParsePolicyError(pub String);

impl OrderingPolicy {
    pub const ALL: [OrderingPolicy; 6] = [
        OrderingPolicy::NameAsc,
        OrderingPolicy::NameDesc,
        OrderingPolicy::SizeAsc,
        OrderingPolicy::SizeDesc,
        OrderingPolicy::TimeAsc,
        OrderingPolicy::TimeDesc,
    ];

    pub fn from_parts(key: SortKey, direction: Direction) -> Self {
        use Direction::*;
        use SortKey::*;

        match (key, direction) {
            (Name, Ascending) => OrderingPolicy::NameAsc,
            (Name, Descending) => OrderingPolicy::NameDesc,
            (Size, Ascending) => OrderingPolicy::SizeAsc,
            (Size, Descending) => OrderingPolicy::SizeDesc,
            (Time, Ascending) => OrderingPolicy::TimeAsc,
            (Time, Descending) => OrderingPolicy::TimeDesc,
        }
    }

    pub fn key(self) -> SortKey {
        match self {
            OrderingPolicy::NameAsc | OrderingPolicy::NameDesc => SortKey::Name,
            OrderingPolicy::SizeAsc | OrderingPolicy::SizeDesc => SortKey::Size,
            OrderingPolicy::TimeAsc | OrderingPolicy::TimeDesc => SortKey::Time,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            OrderingPolicy::NameAsc | OrderingPolicy::SizeAsc | OrderingPolicy::TimeAsc => {
                Direction::Ascending
            }
            _ => Direction::Descending,
        }
    }

    /// Same key, opposite direction.
    pub fn reversed(self) -> Self {
        let direction = match self.direction() {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        };
        OrderingPolicy::from_parts(self.key(), direction)
    }

    pub fn name(self) -> &'static str {
        match self {
            OrderingPolicy::NameAsc => "nameAsc",
            OrderingPolicy::NameDesc => "nameDesc",
            OrderingPolicy::SizeAsc => "sizeAsc",
            OrderingPolicy::SizeDesc => "sizeDesc",
            OrderingPolicy::TimeAsc => "timeAsc",
            OrderingPolicy::TimeDesc => "timeDesc",
        }
    }

    pub fn compare(self, a: &DirEntryRecord, b: &DirEntryRecord) -> Ordering {
        let ord = match self.key() {
            SortKey::Name => cmp_name_ignore_ascii_case(&a.name, &b.name),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Time => a.mtime_secs.cmp(&b.mtime_secs),
        };

        match self.direction() {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderingPolicy {
    type Err = ParsePolicyError;

    /// Accepts `nameAsc`, `name-asc`, `NAME_DESC`, a bare key (`size`,
    /// ascending) or a bare key with a leading `-` (`-time`, descending).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negated, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        // Separators may only sit between the key and the direction.
        let is_sep = |c: char| c == '-' || c == '_';
        if rest.starts_with(is_sep) || rest.ends_with(is_sep) {
            return Err(ParsePolicyError(s.to_owned()));
        }

        let normalized: String = rest
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let (key_part, direction) = if let Some(k) = normalized.strip_suffix("asc") {
            (k, Some(Direction::Ascending))
        } else if let Some(k) = normalized.strip_suffix("desc") {
            (k, Some(Direction::Descending))
        } else {
            (normalized.as_str(), None)
        };

        let key = match key_part {
            "name" => SortKey::Name,
            "size" => SortKey::Size,
            "time" | "mtime" => SortKey::Time,
            _ => return Err(ParsePolicyError(s.to_owned())),
        };

        let direction = match (negated, direction) {
            (false, Some(d)) => d,
            (false, None) => Direction::Ascending,
            (true, None) => Direction::Descending,
            // `-nameDesc` is ambiguous; refuse it rather than guess.
            (true, Some(_)) => return Err(ParsePolicyError(s.to_owned())),
        };

        Ok(OrderingPolicy::from_parts(key, direction))
    }
}

/// Byte-wise comparison with ASCII letters folded to lowercase, the same
/// ordering `strcasecmp` gives. Non-ASCII bytes compare by value.
pub fn cmp_name_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|c| c.to_ascii_lowercase());
    let b = b.bytes().map(|c| c.to_ascii_lowercase());
    a.cmp(b)
}

/// Stable sort: records that compare equal keep their enumeration order.
pub fn sort_records<F>(records: &mut [DirEntryRecord], compare: F)
where
    F: FnMut(&DirEntryRecord, &DirEntryRecord) -> Ordering,
{
    records.sort_by(compare);
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
