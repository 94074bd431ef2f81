//! Core types for directory mirroring
//!
//! - `EntryKind` / `DirectoryEntry`: one listed entry and its classification
//! - `PathPair`: source path plus its mirrored destination path
//! - `MirrorOptions`: knobs for a walk
//! - `MirrorStats`: counters accumulated during a walk

use crate::copy::DEFAULT_CHUNK_SIZE;
use crate::error::{MirrorError, Result};
use crate::name::{reverse_name, NameMode};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::FileType;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Platform path length limit in bytes (including the terminating NUL)
#[allow(clippy::cast_sign_loss)]
pub const PLATFORM_PATH_MAX: usize = libc::PATH_MAX as usize;

/// Classification of a directory entry, from a status query that does not
/// follow symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file: content gets reversed
    File,
    /// Directory: mirrored and descended into
    Directory,
    /// Symlink, device, FIFO, socket: skipped
    Other,
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// One entry of a source directory ("." and ".." never appear)
///
/// Only the name is kept; [`PathPair::child`] joins it onto the parent pair.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Entry name as listed
    pub name: OsString,
}

/// Source path and the destination path it mirrors to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl PathPair {
    /// Build a pair, rejecting paths that reach `limit` bytes
    ///
    /// # Errors
    ///
    /// Returns `PathTooLong` if either path is `limit` bytes or longer.
    pub fn new(source: PathBuf, destination: PathBuf, limit: usize) -> Result<Self> {
        check_path_len(&source, limit)?;
        check_path_len(&destination, limit)?;
        Ok(Self {
            source,
            destination,
        })
    }

    /// Pair for child `name`, whose destination uses the reversed name
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name cannot be reversed in `mode`, or
    /// `PathTooLong` if a resulting path reaches `limit` bytes.
    pub fn child(&self, name: &OsStr, mode: NameMode, limit: usize) -> Result<Self> {
        let reversed = reverse_name(name, mode)?;
        Self::new(
            self.source.join(name),
            self.destination.join(reversed),
            limit,
        )
    }
}

fn check_path_len(path: &Path, limit: usize) -> Result<()> {
    let len = path.as_os_str().as_bytes().len();
    if len >= limit {
        return Err(MirrorError::PathTooLong {
            path: path.to_path_buf(),
            len,
            limit,
        });
    }
    Ok(())
}

/// Options for one mirroring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Chunk capacity used by the file reverser
    pub chunk_size: usize,
    /// How names are reversed
    pub name_mode: NameMode,
    /// Deepest directory level that may be entered (root is 0)
    pub max_depth: Option<usize>,
    /// Path length limit in bytes
    pub path_limit: usize,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            name_mode: NameMode::Bytes,
            max_depth: None,
            path_limit: PLATFORM_PATH_MAX,
        }
    }
}

/// Mirroring statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MirrorStats {
    /// Destination directories created
    pub directories_created: u64,
    /// Destination directories that already existed and were reused
    pub directories_reused: u64,
    /// Regular files reversed
    pub files_reversed: u64,
    /// Total bytes written to reversed files
    pub bytes_reversed: u64,
    /// Entries skipped because they are neither files nor directories
    pub entries_skipped: u64,
}

impl fmt::Display for MirrorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files ({} bytes), {} directories created, {} reused, {} skipped",
            self.files_reversed,
            self.bytes_reversed,
            self.directories_created,
            self.directories_reused,
            self.entries_skipped
        )
    }
}
