mod config;
pub mod logging;

pub use config::{
    PROGRAM_LOG_LEVEL, PROGRAM_NAME, PROGRAM_SORT, PROGRAM_STRICT, default_scan_root,
    default_sort_name, strict_from_env,
};

pub use logging::init;
