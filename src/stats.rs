//! Read-only statistics over a set of scanned records.
//!
//! Every function here is pure: no I/O and no assumption about input order.
//! Histograms keep keys in first-seen order so ties resolve predictably.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;

use crate::errors::FilerError;
use crate::scan::FileRecord;

/// Insertion-ordered key -> value tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<K> {
    entries: Vec<(K, u64)>,
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Eq + Hash + Clone> Histogram<K> {
    fn tally<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, u64)>,
        K: 'a,
    {
        let mut slots: HashMap<&K, usize> = HashMap::new();
        let mut entries: Vec<(K, u64)> = Vec::new();
        for (key, amount) in items {
            match slots.get(key) {
                Some(&i) => entries[i].1 += amount,
                None => {
                    slots.insert(key, entries.len());
                    entries.push((key.clone(), amount));
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

impl<K> Histogram<K> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Entries by descending value; ties keep first-seen order.
    pub fn sorted_by_count(&self) -> Vec<(&K, u64)> {
        let mut v: Vec<(&K, u64)> = self.iter().collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }

    /// First key holding the maximum value.
    pub fn most_common(&self) -> Option<&K> {
        let mut best: Option<(&K, u64)> = None;
        for (k, v) in self.iter() {
            if best.is_none_or(|(_, bv)| v > bv) {
                best = Some((k, v));
            }
        }
        best.map(|(k, _)| k)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

/// Count of records per extension.
pub fn type_histogram(records: &[FileRecord]) -> Histogram<String> {
    Histogram::tally(records.iter().map(|r| (&r.extension, 1)))
}

/// Count of records per source folder.
pub fn folder_histogram(records: &[FileRecord]) -> Histogram<PathBuf> {
    Histogram::tally(records.iter().map(|r| (&r.source_folder, 1)))
}

/// Sum of record sizes per source folder.
pub fn folder_size_totals(records: &[FileRecord]) -> Histogram<PathBuf> {
    Histogram::tally(records.iter().map(|r| (&r.source_folder, r.size_bytes)))
}

/// Half-open byte range `[lo, hi)`; `hi = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    pub label: String,
    pub lo: u64,
    pub hi: Option<u64>,
}

impl SizeBucket {
    pub fn new(label: impl Into<String>, lo: u64, hi: Option<u64>) -> Self {
        Self {
            label: label.into(),
            lo,
            hi,
        }
    }

    pub fn contains(&self, size: u64) -> bool {
        size >= self.lo && self.hi.is_none_or(|hi| size < hi)
    }
}

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;

/// The standard distribution buckets, ending in an unbounded range.
pub fn default_size_buckets() -> Vec<SizeBucket> {
    vec![
        SizeBucket::new("0-1KB", 0, Some(KB)),
        SizeBucket::new("1KB-100KB", KB, Some(100 * KB)),
        SizeBucket::new("100KB-1MB", 100 * KB, Some(MB)),
        SizeBucket::new("1MB-10MB", MB, Some(10 * MB)),
        SizeBucket::new("10MB-100MB", 10 * MB, Some(100 * MB)),
        SizeBucket::new("100MB-500MB", 100 * MB, Some(500 * MB)),
        SizeBucket::new("500MB+", 500 * MB, None),
    ]
}

/// Count records per bucket; each record lands in the first bucket containing its size.
///
/// Every bucket is reported, including empty ones, in definition order. A record that
/// fits no bucket is an error rather than a silent drop.
pub fn size_bucket_histogram(
    records: &[FileRecord],
    buckets: &[SizeBucket],
) -> Result<Vec<(SizeBucket, u64)>, FilerError> {
    let mut counts = vec![0u64; buckets.len()];
    for r in records {
        let i = buckets
            .iter()
            .position(|b| b.contains(r.size_bytes))
            .ok_or(FilerError::SizeNotBucketed { size: r.size_bytes })?;
        counts[i] += 1;
    }
    Ok(buckets.iter().cloned().zip(counts).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_files: usize,
    /// Distinct source folders.
    pub total_folders: usize,
    pub total_size: u64,
    pub average_size: f64,
    pub most_common_extension: Option<String>,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            total_files: 0,
            total_folders: 0,
            total_size: 0,
            average_size: 0.0,
            most_common_extension: None,
        }
    }
}

/// Headline figures; an empty input yields [`Summary::default`].
pub fn summary(records: &[FileRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }
    let total_size: u64 = records.iter().map(|r| r.size_bytes).sum();
    Summary {
        total_files: records.len(),
        total_folders: folder_histogram(records).len(),
        total_size,
        average_size: total_size as f64 / records.len() as f64,
        most_common_extension: type_histogram(records).most_common().cloned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Extension,
    Size,
    Created,
    Modified,
    Folder,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "type" | "extension" | "ext" => Some(SortKey::Extension),
            "size" => Some(SortKey::Size),
            "created" => Some(SortKey::Created),
            "modified" => Some(SortKey::Modified),
            "folder" => Some(SortKey::Folder),
            _ => None,
        }
    }
}

/// Stable sort of records by `key`.
pub fn sort_records(records: &mut [FileRecord], key: SortKey, descending: bool) {
    records.sort_by(|a, b| {
        let ord = match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Extension => a.extension.cmp(&b.extension),
            SortKey::Size => a.size_bytes.cmp(&b.size_bytes),
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Modified => a.modified_at.cmp(&b.modified_at),
            SortKey::Folder => a.source_folder.cmp(&b.source_folder),
        };
        if descending { ord.reverse() } else { ord }
    });
}
