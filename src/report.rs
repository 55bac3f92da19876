//! CSV reports over scanned and moved records.
//!
//! Column names are a fixed contract shared with downstream tooling:
//! File Name, File Type, File Size (Bytes), File Size (Human Readable),
//! Creation Date, Modification Date, Source Folder; moved reports append
//! Moved Date and Destination Folder.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::fs_ops::MoveOutcome;
use crate::fs_ops::helpers::io_error_with_help;
use crate::scan::FileRecord;
use crate::utils::format_size;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    #[serde(rename = "File Name")]
    name: &'a str,
    #[serde(rename = "File Type")]
    file_type: &'a str,
    #[serde(rename = "File Size (Bytes)")]
    size_bytes: u64,
    #[serde(rename = "File Size (Human Readable)")]
    size_human: String,
    #[serde(rename = "Creation Date")]
    created: String,
    #[serde(rename = "Modification Date")]
    modified: String,
    #[serde(rename = "Source Folder")]
    source_folder: String,
}

// csv cannot serialize flattened structs, so the moved row repeats the columns.
#[derive(Debug, Serialize)]
struct MovedRow<'a> {
    #[serde(rename = "File Name")]
    name: &'a str,
    #[serde(rename = "File Type")]
    file_type: &'a str,
    #[serde(rename = "File Size (Bytes)")]
    size_bytes: u64,
    #[serde(rename = "File Size (Human Readable)")]
    size_human: String,
    #[serde(rename = "Creation Date")]
    created: String,
    #[serde(rename = "Modification Date")]
    modified: String,
    #[serde(rename = "Source Folder")]
    source_folder: String,
    #[serde(rename = "Moved Date")]
    moved: String,
    #[serde(rename = "Destination Folder")]
    destination: String,
}

impl<'a> From<&'a FileRecord> for RecordRow<'a> {
    fn from(r: &'a FileRecord) -> Self {
        Self {
            name: &r.name,
            file_type: &r.extension,
            size_bytes: r.size_bytes,
            size_human: format_size(r.size_bytes),
            created: r.created_at.format(DATE_FORMAT).to_string(),
            modified: r.modified_at.format(DATE_FORMAT).to_string(),
            source_folder: r.source_folder.display().to_string(),
        }
    }
}

/// Write one row per record to `w`, header first.
pub fn write_records_csv<W: io::Write>(w: W, records: &[FileRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    for r in records {
        wtr.serialize(RecordRow::from(r))?;
    }
    if records.is_empty() {
        // serialize() emits the header lazily; keep the contract for empty reports.
        wtr.write_record([
            "File Name",
            "File Type",
            "File Size (Bytes)",
            "File Size (Human Readable)",
            "Creation Date",
            "Modification Date",
            "Source Folder",
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a row for every record present in `outcome.mapping`, in record order.
///
/// `Destination Folder` carries the full destination path so renamed files stay traceable.
pub fn write_moved_csv<W: io::Write>(
    w: W,
    records: &[FileRecord],
    outcome: &MoveOutcome,
    moved_at: DateTime<Local>,
) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(w);
    let moved = moved_at.format(DATE_FORMAT).to_string();
    let mut rows = 0;
    for r in records {
        let Some(dest) = outcome.mapping.get(&r.source_path()) else {
            continue;
        };
        let base = RecordRow::from(r);
        wtr.serialize(MovedRow {
            name: base.name,
            file_type: base.file_type,
            size_bytes: base.size_bytes,
            size_human: base.size_human,
            created: base.created,
            modified: base.modified,
            source_folder: base.source_folder,
            moved: moved.clone(),
            destination: dest.display().to_string(),
        })?;
        rows += 1;
    }
    wtr.flush()?;
    Ok(rows)
}

/// Create `path` and write the scan report into it.
pub fn write_records_csv_file(path: &Path, records: &[FileRecord]) -> Result<()> {
    let file = File::create(path).map_err(io_error_with_help("create report", path))?;
    write_records_csv(file, records)
        .with_context(|| format!("write report '{}'", path.display()))?;
    info!(path = %path.display(), rows = records.len(), "File stats CSV written");
    Ok(())
}

/// Create `path` and write the moved-files report into it.
pub fn write_moved_csv_file(path: &Path, records: &[FileRecord], outcome: &MoveOutcome) -> Result<()> {
    let file = File::create(path).map_err(io_error_with_help("create report", path))?;
    let rows = write_moved_csv(file, records, outcome, Local::now())
        .with_context(|| format!("write report '{}'", path.display()))?;
    info!(path = %path.display(), rows, "Moved files CSV written");
    Ok(())
}

/// `<dir>/<root name>_<kind>_<YYYYmmdd_HHMMSS>.csv`; a root without a name becomes `root`.
pub fn default_report_path(dir: &Path, root: &Path, kind: &str, at: DateTime<Local>) -> PathBuf {
    let base = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "root".to_string());
    dir.join(format!("{}_{}_{}.csv", base, kind, at.format("%Y%m%d_%H%M%S")))
}
