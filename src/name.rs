//! Name reversal for files and directories
//!
//! Names are treated as raw bytes by default, matching the classic behavior
//! of the tool: a multi-byte UTF-8 character ends up with its bytes in
//! reverse order. [`NameMode::Chars`] reverses Unicode scalar values instead
//! and rejects names that are not valid UTF-8.

use crate::error::{MirrorError, Result};
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

/// How entry names are reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NameMode {
    /// Reverse raw bytes (multi-byte characters are not kept intact)
    #[default]
    Bytes,
    /// Reverse Unicode characters; non-UTF-8 names are rejected
    Chars,
}

/// Reverse a byte sequence
#[must_use]
pub fn reverse_bytes(name: &[u8]) -> Vec<u8> {
    name.iter().rev().copied().collect()
}

/// Reverse a single path component according to `mode`
///
/// The empty name reverses to the empty name.
///
/// # Errors
///
/// Returns `InvalidInput` in [`NameMode::Chars`] when `name` is not valid UTF-8.
pub fn reverse_name(name: &OsStr, mode: NameMode) -> Result<OsString> {
    match mode {
        NameMode::Bytes => Ok(OsString::from_vec(reverse_bytes(name.as_bytes()))),
        NameMode::Chars => {
            let text = name.to_str().ok_or_else(|| {
                MirrorError::invalid_name(
                    name.to_string_lossy(),
                    "not valid UTF-8 (use --name-mode bytes)",
                )
            })?;
            Ok(OsString::from(text.chars().rev().collect::<String>()))
        }
    }
}

/// Name of the mirrored root for `source`: its base name, reversed
///
/// # Errors
///
/// Returns `InvalidInput` if `source` has no final component (`/`, `..`)
/// or the base name cannot be reversed in `mode`.
pub fn destination_root_name(source: &Path, mode: NameMode) -> Result<OsString> {
    let base = source.file_name().ok_or_else(|| {
        MirrorError::invalid_name(source.display().to_string(), "path has no base name")
    })?;
    reverse_name(base, mode)
}
