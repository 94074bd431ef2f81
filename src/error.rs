//! Error types for revmirror
//!
//! Every failure carries the path it happened on and, for OS-level failures,
//! the underlying `std::io::Error`. OS errors are classified by
//! [`std::io::ErrorKind`] so callers can tell a missing path from a
//! permission problem without string matching.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for mirroring operations
#[derive(Error, Debug)]
pub enum MirrorError {
    /// A name was missing or could not be reversed
    #[error("Invalid name {name:?}: {reason}")]
    InvalidInput { name: String, reason: String },

    /// Path does not exist
    #[error("Failed to {op} '{}': not found", .path.display())]
    NotFound {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied by the OS
    #[error("Failed to {op} '{}': permission denied", .path.display())]
    PermissionDenied {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure (read, write, seek, size query, mkdir, listdir)
    #[error("Failed to {op} '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path byte length reached the platform limit
    #[error("Path too long ({len} bytes, limit {limit}): '{}'", .path.display())]
    PathTooLong {
        path: PathBuf,
        len: usize,
        limit: usize,
    },

    /// Expected a directory
    #[error("Not a directory: '{}'", .path.display())]
    NotADirectory { path: PathBuf },

    /// Source and destination overlap (one contains the other)
    #[error("Source and destination overlap: '{}' <-> '{}'", .src.display(), .dst.display())]
    SourceDestinationOverlap { src: PathBuf, dst: PathBuf },

    /// Descending further would exceed the configured depth
    #[error("Depth limit {limit} exceeded at '{}'", .path.display())]
    DepthLimitExceeded { path: PathBuf, limit: usize },

    /// Invalid option value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`MirrorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    PermissionDenied,
    Io,
    PathTooLong,
    NotADirectory,
    SourceDestinationOverlap,
    DepthLimitExceeded,
    InvalidConfig,
}

impl MirrorError {
    /// Wrap an OS error for `op` on `path`, classifying it by kind
    pub fn io(op: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { op, path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { op, path, source },
            _ => Self::Io { op, path, source },
        }
    }

    /// Build an `InvalidInput` error for a name
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Classification of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Io { .. } => ErrorKind::Io,
            Self::PathTooLong { .. } => ErrorKind::PathTooLong,
            Self::NotADirectory { .. } => ErrorKind::NotADirectory,
            Self::SourceDestinationOverlap { .. } => ErrorKind::SourceDestinationOverlap,
            Self::DepthLimitExceeded { .. } => ErrorKind::DepthLimitExceeded,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Path the error refers to, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. }
            | Self::PathTooLong { path, .. }
            | Self::NotADirectory { path }
            | Self::DepthLimitExceeded { path, .. } => Some(path),
            Self::SourceDestinationOverlap { dst, .. } => Some(dst),
            Self::InvalidInput { .. } | Self::InvalidConfig(_) => None,
        }
    }
}

/// Result type alias for `MirrorError`
pub type Result<T> = std::result::Result<T, MirrorError>;
