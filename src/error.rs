//! Classified per-file failures.
//!
//! Nothing in a run is fatal: every variant here describes one file that was
//! skipped, and the caller decides whether the kind deserves a log line.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The image could not be opened, normalized, or encoded.
    #[error("failed to convert {}: {reason}", path.display())]
    Transcode { path: PathBuf, reason: String },

    /// The file is not valid UTF-8 and is treated as binary.
    #[error("skipped non-UTF-8 file {}", path.display())]
    DecodeSkip { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory entry could not be visited during traversal.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl AssetError {
    pub fn transcode(path: &Path, reason: impl ToString) -> Self {
        Self::Transcode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// The file this failure is keyed by.
    pub fn path(&self) -> &Path {
        match self {
            Self::Transcode { path, .. }
            | Self::DecodeSkip { path }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Delete { path, .. }
            | Self::Walk { path, .. } => path,
        }
    }

    /// Decode skips are the expected outcome for binary files and carry no diagnostic.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::DecodeSkip { .. })
    }
}

pub type AssetResult<T> = Result<T, AssetError>;
