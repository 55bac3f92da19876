//! Batched, paced move of scanned records into one destination folder.
//!
//! Moves run strictly in sequence so every conflict resolution observes the
//! previous move. Batching exists only to pause between bursts of filesystem
//! work. A failing record is logged and counted; it never aborts the run.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::errors::FilerError;
use crate::scan::FileRecord;

use super::conflict::{ConflictResolver, DEFAULT_MAX_PROBES};
use super::file_move::relocate;
use super::helpers::io_hint;

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Tuning for a move run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOptions {
    /// Records per batch; values below 1 are treated as 1.
    pub batch_size: usize,
    /// Pause after every batch except the last.
    pub inter_batch_delay: Duration,
    pub max_conflict_probes: u64,
    /// Resolve and record destinations without touching the filesystem.
    pub dry_run: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay: DEFAULT_BATCH_DELAY,
            max_conflict_probes: DEFAULT_MAX_PROBES,
            dry_run: false,
        }
    }
}

/// Original source path -> final destination path, in move order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveMapping {
    entries: Vec<(PathBuf, PathBuf)>,
    index: HashMap<PathBuf, usize>,
}

impl MoveMapping {
    fn push(&mut self, src: PathBuf, dest: PathBuf) {
        self.index.insert(src.clone(), self.entries.len());
        self.entries.push((src, dest));
    }

    /// Destination a source path was moved to, if it was moved.
    pub fn get(&self, src: &Path) -> Option<&Path> {
        self.index.get(src).map(|&i| self.entries[i].1.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries.iter().map(|(s, d)| (s.as_path(), d.as_path()))
    }
}

/// Result of one move run. `attempted == moved + skipped + failed`.
#[derive(Debug, Clone, Default)]
pub struct MoveOutcome {
    pub mapping: MoveMapping,
    pub attempted: usize,
    pub moved: usize,
    /// Records already sitting at their destination.
    pub skipped: usize,
    pub failed: usize,
    pub moved_bytes: u64,
    pub failed_sources: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Moves records into a fixed destination with the configured pacing.
#[derive(Debug, Clone)]
pub struct MoveEngine {
    destination: PathBuf,
    options: MoveOptions,
    resolver: ConflictResolver,
}

impl MoveEngine {
    pub fn new(destination: impl Into<PathBuf>, options: MoveOptions) -> Self {
        let resolver = ConflictResolver::new(options.max_conflict_probes);
        Self {
            destination: destination.into(),
            options,
            resolver,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Move only the records whose name satisfies `classifier`.
    pub fn run_filtered<F>(&self, records: &[FileRecord], classifier: F) -> Result<MoveOutcome, FilerError>
    where
        F: Fn(&str) -> bool,
    {
        let selected: Vec<FileRecord> = records
            .iter()
            .filter(|r| classifier(&r.name))
            .cloned()
            .collect();
        self.run(&selected)
    }

    /// Move every record, in input order.
    ///
    /// A record whose file already sits at its destination name is counted as skipped,
    /// even when the destination was given as a relative or symlinked path.
    pub fn run(&self, records: &[FileRecord]) -> Result<MoveOutcome, FilerError> {
        let dest_dir = &self.destination;
        if self.options.dry_run {
            info!(path = %dest_dir.display(), "dry-run: would ensure destination exists");
        } else {
            fs::create_dir_all(dest_dir).map_err(|source| FilerError::DestinationUnavailable {
                path: dest_dir.clone(),
                source,
            })?;
        }

        let batch_size = self.options.batch_size.max(1);
        let total_batches = records.len().div_ceil(batch_size);
        let mut outcome = MoveOutcome {
            dry_run: self.options.dry_run,
            ..Default::default()
        };
        // Destinations claimed by this run; only consulted in dry-run mode.
        let mut planned: HashSet<PathBuf> = HashSet::new();

        for (i, batch) in records.chunks(batch_size).enumerate() {
            for record in batch {
                self.move_one(record, &mut planned, &mut outcome);
            }
            info!(
                batch = i + 1,
                of = total_batches,
                moved = outcome.moved,
                failed = outcome.failed,
                "Batch finished"
            );
            if i + 1 < total_batches && !self.options.inter_batch_delay.is_zero() {
                thread::sleep(self.options.inter_batch_delay);
            }
        }

        info!(
            destination = %dest_dir.display(),
            attempted = outcome.attempted,
            moved = outcome.moved,
            skipped = outcome.skipped,
            failed = outcome.failed,
            dry_run = outcome.dry_run,
            "Move run complete"
        );
        Ok(outcome)
    }

    fn move_one(&self, record: &FileRecord, planned: &mut HashSet<PathBuf>, outcome: &mut MoveOutcome) {
        outcome.attempted += 1;
        let src = record.source_path();
        let desired = self.destination.join(&record.name);
        if same_location(&src, &desired) {
            debug!(path = %src.display(), "Already at destination; skipping");
            outcome.skipped += 1;
            return;
        }

        let resolved = if self.options.dry_run {
            self.resolver
                .resolve_with(&desired, |p| planned.contains(p) || p.symlink_metadata().is_ok())
        } else {
            self.resolver.resolve(&desired)
        };
        let dest = match resolved {
            Ok(dest) => dest,
            Err(err) => {
                warn!(code = err.code(), src = %src.display(), error = %err, "No free destination name");
                outcome.failed += 1;
                outcome.failed_sources.push(src);
                return;
            }
        };

        if self.options.dry_run {
            info!(src = %src.display(), dest = %dest.display(), "dry-run: would move file");
            planned.insert(dest.clone());
        } else if let Err(source) = relocate(&src, &dest) {
            let hint = io_hint("move", &src, &source);
            let err = FilerError::MoveFailure {
                src: src.clone(),
                dest: dest.clone(),
                source,
            };
            warn!(code = err.code(), dest = %dest.display(), %hint, "Move failed");
            outcome.failed += 1;
            outcome.failed_sources.push(src);
            return;
        } else {
            debug!(src = %src.display(), dest = %dest.display(), "Moved file");
        }

        outcome.moved += 1;
        outcome.moved_bytes += record.size_bytes;
        outcome.mapping.push(src, dest);
    }
}

/// True when both paths name the same existing file, however they are spelled.
fn same_location(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Move `records` into `destination` using `options`.
pub fn move_records(
    records: &[FileRecord],
    destination: &Path,
    options: &MoveOptions,
) -> Result<MoveOutcome, FilerError> {
    MoveEngine::new(destination, options.clone()).run(records)
}
