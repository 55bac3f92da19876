//! File discovery: classification, per-file records and the parallel tree scanner.

pub mod classify;
pub mod record;
mod walk;

pub use classify::{
    DEFAULT_MEDIA_EXTENSIONS, ScanConfig, matches, normalize_extensions, normalize_skips,
};
pub use record::{FileRecord, extension_of, stat_file};
pub use walk::scan;
