//! Per-file metadata snapshot produced by the scanner.

use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::FilerError;

/// One discovered file. Size and timestamps are a snapshot taken at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    /// Lowercased final suffix including the dot; empty when the name has none.
    pub extension: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Local>,
    pub modified_at: DateTime<Local>,
    pub source_folder: PathBuf,
}

impl FileRecord {
    /// Build a record from a name, its containing folder and already-fetched metadata.
    pub fn from_metadata(name: &str, source_folder: &Path, meta: &Metadata) -> Self {
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        Self {
            name: name.to_string(),
            extension: extension_of(name),
            size_bytes: meta.len(),
            created_at: DateTime::<Local>::from(created_time(meta).unwrap_or(modified)),
            modified_at: DateTime::<Local>::from(modified),
            source_folder: source_folder.to_path_buf(),
        }
    }

    /// Full path of the file at scan time.
    pub fn source_path(&self) -> PathBuf {
        self.source_folder.join(&self.name)
    }
}

/// Lowercased extension of `name`, dot included (`"Song.MP3"` -> `".mp3"`).
///
/// Dotfiles without another dot (`.env`) have no extension; a trailing dot
/// (`name.`) yields `"."`.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Stat a single file path into a record. Symlinks are followed.
pub fn stat_file(path: &Path) -> Result<FileRecord, FilerError> {
    let meta = std::fs::metadata(path).map_err(|source| FilerError::StatFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FilerError::StatFailure {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file name missing or not valid UTF-8",
            ),
        })?;
    let folder = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(FileRecord::from_metadata(name, folder, &meta))
}

// Birth time where the platform records it, else inode change time on Unix.
fn created_time(meta: &Metadata) -> Option<SystemTime> {
    if let Ok(t) = meta.created() {
        return Some(t);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let secs = meta.ctime();
        if secs >= 0 {
            return Some(
                SystemTime::UNIX_EPOCH
                    + std::time::Duration::new(secs as u64, meta.ctime_nsec().clamp(0, 999_999_999) as u32),
            );
        }
    }
    None
}
