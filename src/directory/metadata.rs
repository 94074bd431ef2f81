//! Directory creation and permission handling

use crate::copy::MODE_MASK;
use crate::error::{MirrorError, Result};
use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::Path;
use tracing::debug;

/// Owner bits kept on a destination directory while it is being filled
const OWNER_RWX: u32 = 0o700;

/// Outcome of [`ensure_directory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Created,
    Reused,
}

/// Permission bits of `metadata`
#[must_use]
pub fn permission_bits(metadata: &fs::Metadata) -> u32 {
    metadata.permissions().mode() & MODE_MASK
}

/// Create `dst` with `mode`, or accept it if it already is a directory
///
/// The directory is created with owner rwx added so its children can be
/// written; [`apply_permissions`] sets the exact bits once it is complete.
///
/// # Errors
///
/// Returns `NotADirectory` if `dst` exists but is not a directory (a symlink
/// to a directory counts as not a directory), or the classified OS error if
/// creation fails.
pub fn ensure_directory(dst: &Path, mode: u32) -> Result<DirectoryState> {
    match DirBuilder::new().mode(mode | OWNER_RWX).create(dst) {
        Ok(()) => {
            debug!("Created directory: {}", dst.display());
            Ok(DirectoryState::Created)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            let existing = fs::symlink_metadata(dst)
                .map_err(|e| MirrorError::io("stat destination directory", dst, e))?;
            if !existing.is_dir() {
                return Err(MirrorError::NotADirectory {
                    path: dst.to_path_buf(),
                });
            }
            debug!("Reusing existing directory: {}", dst.display());
            Ok(DirectoryState::Reused)
        }
        Err(e) => Err(MirrorError::io("create directory", dst, e)),
    }
}

/// Set the exact permission bits of `path`, independent of the umask
///
/// # Errors
///
/// Returns the classified OS error if `chmod` fails.
pub fn apply_permissions(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| MirrorError::io("set permissions on", path, e))
}
