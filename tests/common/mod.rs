//! Shared helpers for integration tests

#![allow(dead_code)] // Not all test files use every helper
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a tree entry looks like after a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir { mode: u32 },
    File { mode: u32, content: Vec<u8> },
}

/// Snapshot of every entry below `root`, keyed by relative path bytes
///
/// Symlinks are not followed and are left out of the snapshot.
pub fn snapshot(root: &Path) -> BTreeMap<Vec<u8>, Node> {
    let mut nodes = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry.expect("walk failed");
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap()
            .as_os_str()
            .as_bytes()
            .to_vec();
        let meta = entry.metadata().unwrap();
        let mode = meta.permissions().mode() & 0o7777;
        if meta.is_dir() {
            nodes.insert(rel, Node::Dir { mode });
        } else if meta.is_file() {
            let content = fs::read(entry.path()).unwrap();
            nodes.insert(rel, Node::File { mode, content });
        }
    }
    nodes
}

/// Expected snapshot of the mirror of `snap`: every path component and
/// every file content reversed
pub fn reversed_snapshot(snap: &BTreeMap<Vec<u8>, Node>) -> BTreeMap<Vec<u8>, Node> {
    snap.iter()
        .map(|(path, node)| {
            let reversed_path = path
                .split(|b| *b == b'/')
                .map(|component| component.iter().rev().copied().collect::<Vec<u8>>())
                .collect::<Vec<_>>()
                .join(&b'/');
            let node = match node {
                Node::Dir { mode } => Node::Dir { mode: *mode },
                Node::File { mode, content } => Node::File {
                    mode: *mode,
                    content: content.iter().rev().copied().collect(),
                },
            };
            (reversed_path, node)
        })
        .collect()
}

/// Write `content` to `root/rel`, creating parent directories
pub fn write_file(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Deterministic non-palindromic test data
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 253) as u8).collect()
}

/// Permission-denied scenarios cannot be produced as root
pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}
