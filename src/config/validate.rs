//! Config validation logic.
//! Verifies the root is a readable directory, the destination is usable and the
//! pacing values are sane before any scan or move starts.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::FilerError;
use crate::utils::is_writable_probe;

use super::types::{Config, absolute_path};

impl Config {
    /// Validate paths and tuning values.
    pub fn validate(&self) -> Result<()> {
        // 1) Root: must exist, be a directory, and be readable.
        if !self.root.is_dir() {
            error!("root is missing or not a directory: {}", self.root.display());
            return Err(FilerError::RootNotFound(self.root.clone()).into());
        }
        fs::read_dir(&self.root).with_context(|| {
            format!("Cannot read root directory '{}'; check permissions", self.root.display())
        })?;
        debug!("root readable: {}", self.root.display());

        // 2) Destination: a directory if it exists, writable unless dry-run, and not an
        //    ancestor of the root (the skip-list would then hide the whole tree).
        if let Some(dest) = &self.destination {
            ensure_destination_usable(dest, self.dry_run)?;
            let root_real = absolute_path(&self.root);
            let dest_real = absolute_path(dest);
            if root_real.starts_with(&dest_real) {
                return Err(FilerError::InvalidConfig(format!(
                    "destination '{}' contains the scan root '{}'",
                    dest_real.display(),
                    root_real.display()
                ))
                .into());
            }
        }

        // 3) Pacing.
        if self.batch_size == 0 {
            return Err(FilerError::InvalidConfig("batch_size must be at least 1".into()).into());
        }

        info!(
            "Config validated: root='{}' destination='{}' all_files={} extensions={}",
            self.root.display(),
            self.destination
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into()),
            self.all_files,
            self.effective_extensions().len()
        );
        Ok(())
    }
}

fn ensure_destination_usable(dest: &Path, dry_run: bool) -> Result<()> {
    if dest.exists() {
        if !dest.is_dir() {
            error!("destination exists but isn't a directory: {}", dest.display());
            bail!("destination exists but isn't a directory: {}", dest.display());
        }
        if !dry_run {
            is_writable_probe(dest).with_context(|| {
                format!("Cannot write to destination '{}'; check permissions", dest.display())
            })?;
            debug!("destination writable: {}", dest.display());
        }
    }
    Ok(())
}
