//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --ext and --skip may be repeated and also accept comma-separated lists.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::scan::{normalize_extensions, normalize_skips};
use crate::stats::SortKey;

/// CLI wrapper for the filer library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Scan a folder tree, report file statistics and gather matching files"
)]
pub struct Args {
    /// Folder to scan (overrides the configured root).
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Extension to match, e.g. `mp3` or `.jpg`. Repeatable; commas allowed.
    #[arg(long = "ext", short = 'e', value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Match every file regardless of extension.
    #[arg(long, short = 'a')]
    pub all_files: bool,

    /// Skip directories whose path contains this substring. Repeatable; commas allowed.
    #[arg(long = "skip", value_name = "SUBSTRING")]
    pub skip: Vec<String>,

    /// Gather matching files into this folder (created if missing).
    #[arg(long = "dest", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Files moved per batch.
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Pause between batches, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub batch_delay_ms: Option<u64>,

    /// Dry-run: resolve and log moves, but do not modify files/directories.
    #[arg(long)]
    pub dry_run: bool,

    /// Write the scanned-files CSV report to this path.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Write the moved-files CSV report to this path (requires --dest).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub moved_csv: Option<PathBuf>,

    /// Order CSV rows by: name, type, size, created, modified, folder.
    #[arg(long, value_name = "KEY", value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Reverse the --sort order (largest/newest first).
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location used by filer and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a template config file to the default location and exit.
    #[arg(long)]
    pub init_config: bool,
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| format!("unknown sort key '{s}'"))
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = sanitize_path(root);
        }
        if !self.extensions.is_empty() {
            cfg.extensions = normalize_extensions(&self.extensions);
        }
        if self.all_files {
            cfg.all_files = true;
        }
        if !self.skip.is_empty() {
            cfg.skip_folders.extend(normalize_skips(&self.skip));
        }
        if let Some(dest) = &self.destination {
            cfg.destination = Some(sanitize_path(dest));
        }
        if let Some(n) = self.batch_size {
            cfg.batch_size = n;
        }
        if let Some(ms) = self.batch_delay_ms {
            cfg.batch_delay = std::time::Duration::from_millis(ms);
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
    }
}

/// Trim surrounding quotes left behind by shells (PowerShell/CMD quoting) and one
/// trailing separator, without touching a bare root.
fn sanitize_path(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    let trimmed = s.trim();
    let mut inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
    };

    if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
        inner.pop();
    }
    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}
