use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "dirscan";
pub const PROGRAM_LOG_LEVEL: &str = "DIRSCAN_LOG_LEVEL";
/// Ordering policy used when no `--sort`/`--policy` flag is given, e.g. `sizeDesc`.
pub const PROGRAM_SORT: &str = "DIRSCAN_SORT";
/// Abort the whole listing on the first per-entry metadata failure.
pub const PROGRAM_STRICT: &str = "DIRSCAN_STRICT";

/// Default directory to list: the current directory, as `ls` does.
pub fn default_scan_root() -> PathBuf {
    PathBuf::from(".")
}

/// Policy name from the environment, if set and non-empty.
///
/// Parsing is left to the caller so this crate stays free of listing types.
pub fn default_sort_name() -> Option<String> {
    std::env::var(PROGRAM_SORT)
        .ok()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

pub fn strict_from_env() -> bool {
    match std::env::var(PROGRAM_STRICT) {
        Ok(val) => {
            let val = val.trim();
            val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
        }
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
