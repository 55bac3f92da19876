//! Core library for `filer`.
//!
//! Scans a directory tree into per-file records, derives statistics from them and
//! gathers matching files into one destination folder with deterministic,
//! non-overwriting names. The binary is a thin layer over these modules.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod report;
pub mod scan;
pub mod stats;
pub mod utils;

pub use config::{
    Config, LogLevel, default_config_path, default_log_path, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use errors::FilerError;
pub use fs_ops::{
    ConflictResolver, MoveEngine, MoveMapping, MoveOptions, MoveOutcome, move_records,
    resolve_conflict,
};
pub use scan::{FileRecord, ScanConfig, matches, scan, stat_file};
pub use stats::{
    Histogram, SizeBucket, SortKey, Summary, default_size_buckets, folder_histogram,
    folder_size_totals, size_bucket_histogram, sort_records, summary, type_histogram,
};
pub use utils::format_size;
