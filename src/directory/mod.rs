//! Directory tree mirroring
//!
//! This module walks a source directory and recreates it at a destination
//! with every name reversed and every regular file's content reversed.
//! Permission bits of files and directories are carried over.
//!
//! # Module Organization
//!
//! - `types`: Core data structures (`PathPair`, `MirrorOptions`, `MirrorStats`)
//! - `metadata`: Directory creation and permission bits
//! - `traversal`: The stack-based walk
//! - `mod`: Public API (this file)
//!
//! Symlinks are never followed inside the tree: a symlink entry (to a file
//! or a directory) is skipped like any other non-regular entry.

mod metadata;
mod traversal;
mod types;

pub use metadata::{apply_permissions, ensure_directory, permission_bits, DirectoryState};
pub use types::{
    DirectoryEntry, EntryKind, MirrorOptions, MirrorStats, PathPair, PLATFORM_PATH_MAX,
};

use crate::error::{MirrorError, Result};
use crate::name::destination_root_name;
use std::path::{Path, PathBuf};
use tracing::info;

/// Mirror `src` into `dst`
///
/// `dst` is created if missing and reused if it already is a directory.
///
/// # Errors
///
/// Returns error if:
/// - `src` doesn't exist, isn't accessible, or isn't a directory
/// - `src` and `dst` overlap (one contains the other)
/// - A path reaches the length limit
/// - Any directory, listing, or file operation fails during the walk;
///   work done before the failure is left on disk
pub fn mirror_directory(src: &Path, dst: &Path, options: &MirrorOptions) -> Result<MirrorStats> {
    let src_meta =
        std::fs::metadata(src).map_err(|e| MirrorError::io("access source directory", src, e))?;
    if !src_meta.is_dir() {
        return Err(MirrorError::NotADirectory {
            path: src.to_path_buf(),
        });
    }
    check_overlap(src, dst)?;

    info!(
        "Starting mirror from {} to {}",
        src.display(),
        dst.display()
    );

    let root = PathPair::new(src.to_path_buf(), dst.to_path_buf(), options.path_limit)?;
    let mut stats = MirrorStats::default();
    traversal::walk(root, options, &mut stats)?;

    info!("Mirror completed: {stats}");
    Ok(stats)
}

/// Mirror `src` into `output_dir`, naming the new root after `src`'s
/// reversed base name
///
/// Returns the destination root and the run statistics.
///
/// # Errors
///
/// Returns `InvalidInput` if `src` has no base name, plus everything
/// [`mirror_directory`] can return.
pub fn mirror_tree(
    src: &Path,
    output_dir: &Path,
    options: &MirrorOptions,
) -> Result<(PathBuf, MirrorStats)> {
    let root_name = destination_root_name(src, options.name_mode)?;
    let dst = output_dir.join(root_name);
    let stats = mirror_directory(src, &dst, options)?;
    Ok((dst, stats))
}

/// Reject destinations inside the source (the walk would list its own
/// output) and sources inside the destination
fn check_overlap(src: &Path, dst: &Path) -> Result<()> {
    let src_abs = src
        .canonicalize()
        .map_err(|e| MirrorError::io("resolve source directory", src, e))?;
    let dst_abs = resolve_destination(dst)?;
    if dst_abs.starts_with(&src_abs) || src_abs.starts_with(&dst_abs) {
        return Err(MirrorError::SourceDestinationOverlap {
            src: src_abs,
            dst: dst_abs,
        });
    }
    Ok(())
}

/// Absolute form of `dst`, whose final component may not exist yet
fn resolve_destination(dst: &Path) -> Result<PathBuf> {
    if let Ok(existing) = dst.canonicalize() {
        return Ok(existing);
    }
    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent_abs = parent
        .canonicalize()
        .map_err(|e| MirrorError::io("resolve destination parent", parent, e))?;
    match dst.file_name() {
        Some(name) => Ok(parent_abs.join(name)),
        None => Err(MirrorError::invalid_name(
            dst.display().to_string(),
            "destination has no base name",
        )),
    }
}
