//! Destination conflict resolution.
//!
//! Policy: a free desired path is used as-is. An occupied one has any single trailing
//! "(N)" stripped from its stem and is re-suffixed "(1)", "(2)", ... before the
//! extension until a free name is found, so repeated collisions never stack
//! ("x(1)(1).jpg"). Stems that naturally end in parenthesized digits ("photo(2020)")
//! are treated as already suffixed.
//!
//! Notes:
//! - Resolution only reads existence; callers that move in sequence must resolve each
//!   file after the previous move so the new occupant is observed.
//! - A dangling symlink counts as occupied.

use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::trace;

use crate::errors::FilerError;

pub const DEFAULT_MAX_PROBES: u64 = 10_000;

static NUMBER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\(\d+\)$").expect("valid suffix pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictResolver {
    /// Upper bound on numbered candidates tried before giving up.
    pub max_probes: u64,
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self {
            max_probes: DEFAULT_MAX_PROBES,
        }
    }
}

impl ConflictResolver {
    pub fn new(max_probes: u64) -> Self {
        Self { max_probes }
    }

    /// Resolve against the live filesystem.
    pub fn resolve(&self, desired: &Path) -> Result<PathBuf, FilerError> {
        self.resolve_with(desired, path_occupied)
    }

    /// Resolve using a caller-supplied occupancy check.
    pub fn resolve_with<F>(&self, desired: &Path, mut occupied: F) -> Result<PathBuf, FilerError>
    where
        F: FnMut(&Path) -> bool,
    {
        if !occupied(desired) {
            return Ok(desired.to_path_buf());
        }

        let stem: OsString = desired
            .file_stem()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        let base = strip_number_suffix(&stem);
        let ext = desired.extension();

        for n in 1..=self.max_probes {
            let mut name = base.clone();
            name.push(format!("({n})"));
            if let Some(e) = ext {
                name.push(".");
                name.push(e);
            }
            let candidate = desired.with_file_name(&name);
            if !occupied(&candidate) {
                return Ok(candidate);
            }
            if n == 3 {
                trace!(desired = %desired.display(), "conflict: multiple collisions, still probing");
            }
        }

        Err(FilerError::ConflictResolutionExhausted {
            desired: desired.to_path_buf(),
            probes: self.max_probes,
        })
    }
}

/// Resolve `desired` with the default probe bound.
pub fn resolve_conflict(desired: &Path) -> Result<PathBuf, FilerError> {
    ConflictResolver::default().resolve(desired)
}

/// Remove one trailing "(digits)" group from a stem; non-UTF-8 stems are left alone.
pub fn strip_number_suffix(stem: &OsStr) -> OsString {
    match stem.to_str() {
        Some(s) => match NUMBER_SUFFIX.captures(s) {
            Some(caps) => OsString::from(&caps[1]),
            None => stem.to_os_string(),
        },
        None => stem.to_os_string(),
    }
}

fn path_occupied(p: &Path) -> bool {
    p.symlink_metadata().is_ok()
}
