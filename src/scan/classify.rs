//! Filename classification: decides whether a file is in scope for a scan or move.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Extensions used when the caller asks for neither explicit extensions nor all files.
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[
    ".mp3", ".mp4", ".avi", ".mkv", ".jpg", ".jpeg", ".png", ".gif",
];

/// Immutable parameters of a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: PathBuf,
    /// Compared literally (dot included) against the lowercased filename.
    pub extensions: BTreeSet<String>,
    pub all_files: bool,
    /// Any directory whose full path contains one of these is not listed.
    pub skip_substrings: BTreeSet<String>,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: BTreeSet::new(),
            all_files: false,
            skip_substrings: BTreeSet::new(),
        }
    }

    /// Match every file regardless of extension.
    pub fn all_files(mut self) -> Self {
        self.all_files = true;
        self
    }

    pub fn with_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions.extend(exts.into_iter().map(Into::into));
        self
    }

    pub fn with_skip<I, S>(mut self, skips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_substrings.extend(skips.into_iter().map(Into::into));
        self
    }

    /// True when `dir` (as a full path string) contains a skip substring.
    pub fn is_skipped(&self, dir: &str) -> bool {
        self.skip_substrings.iter().any(|s| dir.contains(s.as_str()))
    }

    /// Borrowing predicate form of [`matches`], handy for filtering records.
    pub fn classifier(&self) -> impl Fn(&str) -> bool + '_ {
        move |name| matches(name, self)
    }
}

/// True if `all_files` is set, else if the lowercased `filename` ends with any configured extension.
pub fn matches(filename: &str, config: &ScanConfig) -> bool {
    if config.all_files {
        return true;
    }
    let lower = filename.to_lowercase();
    config
        .extensions
        .iter()
        .any(|ext| lower.ends_with(ext.as_str()))
}

/// Normalize user-supplied extensions: trim, lowercase, add a leading dot, drop empties.
///
/// Entries may themselves be comma-separated (`"mp3, .JPG"`).
pub fn normalize_extensions<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .flat_map(|s| {
            s.as_ref()
                .split(',')
                .map(|p| p.trim().to_lowercase())
                .collect::<Vec<_>>()
        })
        .filter(|p| !p.is_empty() && p != ".")
        .map(|p| if p.starts_with('.') { p } else { format!(".{p}") })
        .collect()
}

/// Split comma-separated skip entries, trimming whitespace and dropping empties.
///
/// An empty skip entry would match every path, so it is never kept.
pub fn normalize_skips<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .flat_map(|s| {
            s.as_ref()
                .split(',')
                .map(|p| p.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_files_matches_anything() {
        let cfg = ScanConfig::new("/r").all_files();
        assert!(matches("whatever", &cfg));
        assert!(matches(".hidden", &cfg));
    }

    #[test]
    fn extension_match_is_case_insensitive_on_name_only() {
        let cfg = ScanConfig::new("/r").with_extensions([".mp3"]);
        assert!(matches("Song.MP3", &cfg));
        assert!(!matches("song.mp4", &cfg));

        // Configured entries are literal; uppercase entries never match.
        let upper = ScanConfig::new("/r").with_extensions([".MP3"]);
        assert!(!matches("song.MP3", &upper));
    }

    #[test]
    fn multi_dot_entries_match_as_suffix() {
        let cfg = ScanConfig::new("/r").with_extensions([".tar.gz"]);
        assert!(matches("backup.TAR.GZ", &cfg));
        assert!(!matches("backup.gz", &cfg));
    }

    #[test]
    fn empty_extension_set_matches_nothing() {
        let cfg = ScanConfig::new("/r");
        assert!(!matches("a.mp3", &cfg));
    }

    #[test]
    fn normalize_handles_commas_case_and_missing_dot() {
        let got = normalize_extensions(["mp3, .JPG", "", " png "]);
        let want: BTreeSet<String> = [".jpg", ".mp3", ".png"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn normalize_skips_drops_empty_entries() {
        let got = normalize_skips(["", ".git, node_modules ,"]);
        assert_eq!(got.len(), 2);
        assert!(got.contains(".git"));
        assert!(got.contains("node_modules"));
    }
}
