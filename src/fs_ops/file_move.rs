//! Single-file relocation.
//! Attempts a rename; on a cross-filesystem error falls back to copy + remove,
//! rolling back the copy when either half fails.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Move `src` to `dest`. The caller has already chosen a free `dest`.
pub fn relocate(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "Renamed file");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), dest = %dest.display(), "Cross-device rename; copying instead");
            copy_then_remove(src, dest)
        }
        Err(e) => Err(e),
    }
}

fn copy_then_remove(src: &Path, dest: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(src, dest) {
        if dest.exists() {
            if let Err(cleanup) = fs::remove_file(dest) {
                warn!(dest = %dest.display(), error = %cleanup, "Failed to clean up partial copy");
            }
        }
        return Err(e);
    }
    if let Err(e) = fs::remove_file(src) {
        // Leave exactly one copy behind: the original.
        if let Err(cleanup) = fs::remove_file(dest) {
            warn!(dest = %dest.display(), error = %cleanup, "Failed to roll back copied file");
        }
        return Err(e);
    }
    Ok(())
}

fn is_cross_device(e: &io::Error) -> bool {
    #[cfg(unix)]
    if e.raw_os_error() == Some(libc::EXDEV) {
        return true;
    }
    #[cfg(windows)]
    if e.raw_os_error() == Some(17) {
        return true;
    }
    e.kind() == io::ErrorKind::CrossesDevices
}
