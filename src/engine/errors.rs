use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error};

/// Raised by the version adapter when a chunk is newer than every known layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("data version {data_version} is newer than the newest supported version {max_supported}")]
pub struct UnsupportedVersion {
    pub data_version: i64,
    pub max_supported: i64,
}

/// Errors raised while cleaning a batch of region files.
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("{} is not a valid path: {reason}", .path.display())]
    InvalidFilename { path: PathBuf, reason: String },

    #[error("{} is not a valid region file: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("{} is empty", .path.display())]
    EmptyFile { path: PathBuf },

    #[error("corrupt region file {}: {reason}", .path.display())]
    CorruptRegion { path: PathBuf, reason: String },

    #[error("chunk ({x}, {z}) in {}: {source}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        x: usize,
        z: usize,
        #[source]
        source: UnsupportedVersion,
    },

    #[error("failed to write {}: {source}", .path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source directory {} does not exist", .path.display())]
    SourceDirMissing { path: PathBuf },

    #[error("destination {} is the source directory", .path.display())]
    SameDirectory { path: PathBuf },

    #[error("worker task failed: {0}")]
    Worker(String),
}

impl CleanerError {
    /// Recoverable errors reject a single file; everything else aborts the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CleanerError::InvalidFilename { .. }
                | CleanerError::InvalidFormat { .. }
                | CleanerError::EmptyFile { .. }
        )
    }

    /// Short machine-friendly label used in skip diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CleanerError::InvalidFilename { .. } => "invalid_filename",
            CleanerError::InvalidFormat { .. } => "invalid_format",
            CleanerError::EmptyFile { .. } => "empty_file",
            CleanerError::CorruptRegion { .. } => "corrupt_region",
            CleanerError::UnsupportedVersion { .. } => "unsupported_version",
            CleanerError::DestinationWrite { .. } => "destination_write",
            CleanerError::SourceRead { .. } => "source_read",
            CleanerError::SourceDirMissing { .. } => "source_dir_missing",
            CleanerError::SameDirectory { .. } => "same_directory",
            CleanerError::Worker(_) => "worker",
        }
    }

    pub fn log_error(&self) {
        match self {
            CleanerError::UnsupportedVersion { source, .. } => {
                error!("{}", self);
                debug!(
                    data_version = source.data_version,
                    max_supported = source.max_supported,
                    "The version table needs a new entry for this layout"
                );
            }
            CleanerError::DestinationWrite { source, .. }
            | CleanerError::SourceRead { source, .. } => {
                error!("{}", self);
                debug!("I/O error details: {:?}", source);
            }
            _ => {
                error!("{}", self);
                debug!("Error details: {:?}", self);
            }
        }
    }
}
