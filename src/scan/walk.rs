//! Tree scanner.
//! Enumerates directories under the root with walkdir, then lists each directory's
//! direct files on the rayon pool. Per-directory and per-file failures are logged and
//! isolated; only a missing root aborts the scan.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::FilerError;
use crate::fs_ops::helpers::io_hint;

use super::classify::{ScanConfig, matches};
use super::record::FileRecord;

/// Scan `config.root` and return one record per matching file. Order is unspecified.
pub fn scan(config: &ScanConfig) -> Result<Vec<FileRecord>, FilerError> {
    if !config.root.is_dir() {
        return Err(FilerError::RootNotFound(config.root.clone()));
    }

    let (dirs, skipped) = collect_dirs(config);
    debug!(
        root = %config.root.display(),
        dirs = dirs.len(),
        skipped,
        "Directory enumeration finished"
    );

    let per_dir: Vec<Vec<FileRecord>> = dirs.par_iter().map(|d| scan_dir(d, config)).collect();
    let records: Vec<FileRecord> = per_dir.into_iter().flatten().collect();

    info!(
        root = %config.root.display(),
        dirs = dirs.len(),
        skipped_dirs = skipped,
        files = records.len(),
        "Scan complete"
    );
    Ok(records)
}

/// Every directory reachable from the root whose path contains no skip substring.
///
/// A skipped directory is pruned: any descendant path contains the same substring.
fn collect_dirs(config: &ScanConfig) -> (Vec<PathBuf>, usize) {
    let mut skipped = 0usize;
    let mut dirs = Vec::new();

    let walker = WalkDir::new(&config.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if !e.file_type().is_dir() {
                return true;
            }
            let keep = !config.is_skipped(&e.path().to_string_lossy());
            if !keep {
                skipped += 1;
                debug!(dir = %e.path().display(), "Skipping directory");
            }
            keep
        });

    for entry in walker {
        match entry {
            Ok(e) if e.file_type().is_dir() => dirs.push(e.into_path()),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                warn!(
                    code = 20,
                    path = %path.display(),
                    error = %e,
                    "Directory traversal error; continuing"
                );
            }
        }
    }
    (dirs, skipped)
}

/// List the direct file entries of one directory. Partial results survive entry errors.
fn scan_dir(dir: &Path, config: &ScanConfig) -> Vec<FileRecord> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            let hint = io_hint("list directory", dir, &source);
            let err = FilerError::DirectoryListFailure {
                path: dir.to_path_buf(),
                source,
            };
            warn!(code = err.code(), %hint, "Skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(code = 20, dir = %dir.display(), error = %e, "Failed reading directory entry");
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                warn!(code = 21, path = %entry.path().display(), error = %e, "Failed to read entry type");
                continue;
            }
        };
        if file_type.is_dir() {
            continue;
        }

        let name_os = entry.file_name();
        let Some(name) = name_os.to_str() else {
            warn!(path = %entry.path().display(), "Skipping file with non-UTF-8 name");
            continue;
        };
        if !matches(name, config) {
            continue;
        }

        let path = entry.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => out.push(FileRecord::from_metadata(name, dir, &meta)),
            Ok(_) => {}
            Err(e) if file_type.is_symlink() && e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Dangling symlink ignored");
            }
            Err(source) => {
                let hint = io_hint("stat", &path, &source);
                let err = FilerError::StatFailure { path, source };
                warn!(code = err.code(), %hint, "Omitting file that could not be stat'd");
            }
        }
    }

    if !out.is_empty() {
        debug!(folder = %dir.display(), count = out.len(), "Files gathered from folder");
    }
    out
}
