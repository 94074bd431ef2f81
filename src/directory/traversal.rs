//! Depth-first tree walk over an explicit stack of directory frames
//!
//! Each frame owns the sorted entry list of one source directory. Entries
//! are dispatched one at a time: directories push a new frame, regular files
//! are reversed, everything else is skipped. A frame is popped once its
//! entries are exhausted, and the destination directory then receives the
//! source's exact permission bits. The first error ends the walk; nothing
//! already written is removed.

use crate::copy::reverse_file;
use crate::error::{MirrorError, Result};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::{debug, trace};

use super::metadata::{apply_permissions, ensure_directory, permission_bits, DirectoryState};
use super::types::{DirectoryEntry, EntryKind, MirrorOptions, MirrorStats, PathPair};

/// One directory on the current descent path
struct Frame {
    pair: PathPair,
    depth: usize,
    mode: u32,
    entries: std::vec::IntoIter<DirectoryEntry>,
}

/// Next unit of work taken from the top frame
enum Step {
    Entry { pair: PathPair, depth: usize },
    Finished,
}

/// Walk `root.source`, mirroring it into `root.destination`
///
/// # Errors
///
/// Returns the first error hit by any listing, classification, directory
/// creation or file reversal. Directories and files completed before that
/// point are left in place. Directories still on the stack at that point keep
/// their creation mode (source bits plus owner rwx) instead of the exact
/// source bits.
pub(super) fn walk(root: PathPair, options: &MirrorOptions, stats: &mut MirrorStats) -> Result<()> {
    let mut stack = vec![open_frame(root, 0, stats)?];

    loop {
        let step = match stack.last_mut() {
            None => break,
            Some(frame) => match frame.entries.next() {
                Some(entry) => Step::Entry {
                    pair: frame
                        .pair
                        .child(&entry.name, options.name_mode, options.path_limit)?,
                    depth: frame.depth + 1,
                },
                None => Step::Finished,
            },
        };

        match step {
            Step::Finished => {
                if let Some(frame) = stack.pop() {
                    apply_permissions(&frame.pair.destination, frame.mode)?;
                    trace!("Finished directory: {}", frame.pair.source.display());
                }
            }
            Step::Entry { pair, depth } => match classify(&pair.source)? {
                EntryKind::Directory => {
                    if let Some(limit) = options.max_depth {
                        if depth > limit {
                            return Err(MirrorError::DepthLimitExceeded {
                                path: pair.source,
                                limit,
                            });
                        }
                    }
                    stack.push(open_frame(pair, depth, stats)?);
                }
                EntryKind::File => {
                    let bytes = reverse_file(&pair.source, &pair.destination, options.chunk_size)?;
                    stats.files_reversed += 1;
                    stats.bytes_reversed += bytes;
                }
                EntryKind::Other => {
                    debug!("Skipping non-regular entry: {}", pair.source.display());
                    stats.entries_skipped += 1;
                }
            },
        }
    }

    Ok(())
}

/// Classify `path` without following a final symlink
fn classify(path: &Path) -> Result<EntryKind> {
    let metadata =
        fs::symlink_metadata(path).map_err(|e| MirrorError::io("stat", path, e))?;
    Ok(EntryKind::from(metadata.file_type()))
}

/// Create the destination for `pair` and list its source entries
fn open_frame(pair: PathPair, depth: usize, stats: &mut MirrorStats) -> Result<Frame> {
    let metadata = fs::metadata(&pair.source)
        .map_err(|e| MirrorError::io("access source directory", &pair.source, e))?;
    if !metadata.is_dir() {
        return Err(MirrorError::NotADirectory { path: pair.source });
    }
    let mode = permission_bits(&metadata);

    match ensure_directory(&pair.destination, mode)? {
        DirectoryState::Created => stats.directories_created += 1,
        DirectoryState::Reused => stats.directories_reused += 1,
    }

    let entries = list_entries(&pair.source)?;
    debug!(
        "Processing directory: {} ({} entries, depth {})",
        pair.source.display(),
        entries.len(),
        depth
    );

    Ok(Frame {
        pair,
        depth,
        mode,
        entries: entries.into_iter(),
    })
}

/// List `dir`, sorted by name bytes
fn list_entries(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let reader = fs::read_dir(dir).map_err(|e| MirrorError::io("open directory", dir, e))?;
    let mut entries = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|e| MirrorError::io("read directory", dir, e))?;
        entries.push(DirectoryEntry {
            name: entry.file_name(),
        });
    }
    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    Ok(entries)
}
