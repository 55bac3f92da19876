//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::fs_ops::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_MAX_PROBES, MoveOptions};
use crate::scan::{DEFAULT_MEDIA_EXTENSIONS, ScanConfig};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for a scan and an optional move.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder to scan
    pub root: PathBuf,
    /// Gather matching files here; no move happens when unset
    pub destination: Option<PathBuf>,
    /// Normalized extensions (lowercase, leading dot)
    pub extensions: BTreeSet<String>,
    /// Match every file regardless of extension
    pub all_files: bool,
    /// Directories whose path contains any of these are not listed
    pub skip_folders: BTreeSet<String>,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub max_conflict_probes: u64,
    /// If true, resolve and log moves but do not modify the filesystem
    pub dry_run: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            destination: None,
            extensions: BTreeSet::new(),
            all_files: false,
            skip_folders: BTreeSet::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            max_conflict_probes: DEFAULT_MAX_PROBES,
            dry_run: false,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config for `root`; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Extensions actually scanned: the configured set, or the media defaults when
    /// neither extensions nor all-files were requested.
    pub fn effective_extensions(&self) -> BTreeSet<String> {
        if self.extensions.is_empty() && !self.all_files {
            DEFAULT_MEDIA_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions.clone()
        }
    }

    /// Build the immutable scan parameters.
    ///
    /// The root is canonicalized so record folders are absolute, and a configured
    /// destination is appended to the skip-list so freshly gathered files are never
    /// rescanned.
    pub fn scan_config(&self) -> ScanConfig {
        let root = absolute_path(&self.root);
        let mut cfg = ScanConfig::new(root)
            .with_extensions(self.effective_extensions())
            .with_skip(self.skip_folders.iter().cloned());
        cfg.all_files = self.all_files;
        if let Some(dest) = &self.destination {
            cfg = cfg.with_skip([absolute_path(dest).to_string_lossy().into_owned()]);
        }
        cfg
    }

    pub fn move_options(&self) -> MoveOptions {
        MoveOptions {
            batch_size: self.batch_size,
            inter_batch_delay: self.batch_delay,
            max_conflict_probes: self.max_conflict_probes,
            dry_run: self.dry_run,
        }
    }
}

/// Canonical form when the path exists, else the lexically absolute form.
pub(crate) fn absolute_path(p: &Path) -> PathBuf {
    dunce::canonicalize(p)
        .or_else(|_| std::path::absolute(p))
        .unwrap_or_else(|_| p.to_path_buf())
}
