//! Typed error definitions for filer.
//! Provides the well-known failure modes of scanning and moving for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilerError {
    #[error("Root folder not found or not a directory: {0}")]
    RootNotFound(PathBuf),

    #[error("Failed to list directory {path}: {source}")]
    DirectoryListFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to stat {path}: {source}")]
    StatFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move {src} -> {dest}: {source}")]
    MoveFailure {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No free name for {desired} after {probes} attempts")]
    ConflictResolutionExhausted { desired: PathBuf, probes: u64 },

    #[error("Destination folder unavailable {path}: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File size {size} falls outside every size bucket")]
    SizeNotBucketed { size: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FilerError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            FilerError::RootNotFound(_) => 10,
            FilerError::DirectoryListFailure { .. } => 20,
            FilerError::StatFailure { .. } => 21,
            FilerError::MoveFailure { .. } => 30,
            FilerError::ConflictResolutionExhausted { .. } => 31,
            FilerError::DestinationUnavailable { .. } => 32,
            FilerError::SizeNotBucketed { .. } => 40,
            FilerError::InvalidConfig(_) => 50,
        }
    }

    /// True for failures that are isolated to one item and never abort a run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FilerError::DirectoryListFailure { .. }
                | FilerError::StatFailure { .. }
                | FilerError::MoveFailure { .. }
                | FilerError::ConflictResolutionExhausted { .. }
        )
    }
}
