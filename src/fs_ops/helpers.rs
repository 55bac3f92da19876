//! I/O helper utilities.
//!
//! Enriches io::Error with actionable, platform-aware hints for log lines and
//! anyhow contexts.
//!
//! Usage:
//!   warn!(hint = %io_hint("stat", path, &e), "...");
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub fn io_hint(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; rename not possible)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; it may have been removed during the run)");
                }
                libc::EEXIST => {
                    msg.push_str(" (already exists)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (no space left on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::ELOOP => {
                    msg.push_str(" (too many symbolic link levels)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (file name or path too long)");
                }
                libc::EMFILE | libc::ENFILE => {
                    msg.push_str(" (too many open files)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied)"),
                17 => msg.push_str(" (not same device; cross-filesystem move)"),
                32 => msg.push_str(" (sharing violation; file is in use)"),
                2 | 3 => msg.push_str(" (path not found)"),
                112 => msg.push_str(" (disk full)"),
                206 => msg.push_str(" (file name or path too long)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(" (permission denied)"),
            io::ErrorKind::NotFound => msg.push_str(" (path not found)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (already exists)"),
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code; use with `.map_err(...)`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(io_hint(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_includes_op_and_path() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let msg = io_hint("stat", Path::new("/x/y.txt"), &e);
        assert!(msg.starts_with("stat '/x/y.txt': gone"));
        assert!(msg.contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn hint_uses_errno() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        let msg = io_hint("rename", Path::new("a"), &e);
        assert!(msg.contains("cross-filesystem"));
        assert!(msg.contains(&format!("[os code: {}]", libc::EXDEV)));
    }
}
