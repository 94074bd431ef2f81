//! Streaming file content reversal
//!
//! A file is processed in fixed-size chunks starting at its tail. Each chunk
//! is read at its offset, reversed in place and appended to the destination,
//! so the destination ends up holding the source bytes in reverse order
//! without the whole file ever being in memory.
//!
//! # Usage
//!
//! ```rust,no_run
//! use revmirror::copy::{reverse_file, DEFAULT_CHUNK_SIZE};
//! use std::path::Path;
//!
//! fn main() -> revmirror::Result<()> {
//!     let bytes = reverse_file(Path::new("in.bin"), Path::new("out.bin"), DEFAULT_CHUNK_SIZE)?;
//!     println!("reversed {bytes} bytes");
//!     Ok(())
//! }
//! ```

use crate::error::{MirrorError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{FileExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;
use tracing::{debug, trace};

/// Default chunk capacity in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest accepted chunk capacity (64 MiB)
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Permission bits carried over from source to destination
pub const MODE_MASK: u32 = 0o7777;

/// Reverse the first `len` bytes of `buf` in place
///
/// Swaps from both ends toward the middle; with an odd `len` the middle byte
/// stays where it is.
pub fn reverse_chunk(buf: &mut [u8], len: usize) {
    buf[..len].reverse();
}

/// Write `src`'s content reversed into `dst`, copying `src`'s permission bits
///
/// `dst` is created or truncated. A symlink at `dst` is never followed and
/// makes the call fail. Returns the number of bytes written.
///
/// # Errors
///
/// This function will return an error if:
/// - `chunk_size` is zero
/// - Source file cannot be opened or its size cannot be queried
/// - Destination file cannot be created, or its permissions cannot be set
/// - Any read or write fails, including a short read when the source
///   shrinks during the copy (a partial destination may remain)
pub fn reverse_file(src: &Path, dst: &Path, chunk_size: usize) -> Result<u64> {
    if chunk_size == 0 {
        return Err(MirrorError::InvalidConfig(
            "chunk size must be greater than 0".to_string(),
        ));
    }

    let source = File::open(src).map_err(|e| MirrorError::io("open source file", src, e))?;
    let metadata = source
        .metadata()
        .map_err(|e| MirrorError::io("query size of", src, e))?;
    let mode = metadata.permissions().mode() & MODE_MASK;
    let size = metadata.len();

    let mut dest = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .custom_flags(libc::O_NOFOLLOW)
        .open(dst)
        .map_err(|e| MirrorError::io("create destination file", dst, e))?;

    let capacity = chunk_size.min(usize::try_from(size).unwrap_or(usize::MAX)).max(1);
    let mut buffer = vec![0u8; capacity];
    let mut remaining = size;

    while remaining > 0 {
        // Bounded by `capacity`, which fits in usize.
        let chunk = usize::try_from(remaining.min(capacity as u64)).unwrap_or(capacity);
        let offset = remaining - chunk as u64;

        source
            .read_exact_at(&mut buffer[..chunk], offset)
            .map_err(|e| MirrorError::io("read source file", src, e))?;
        reverse_chunk(&mut buffer, chunk);
        dest.write_all(&buffer[..chunk])
            .map_err(|e| MirrorError::io("write destination file", dst, e))?;

        trace!(offset, chunk, "Reversed chunk of {}", src.display());
        remaining = offset;
    }

    dest.flush()
        .map_err(|e| MirrorError::io("write destination file", dst, e))?;

    // Creation mode is filtered by the umask; apply the exact bits.
    dest.set_permissions(fs::Permissions::from_mode(mode))
        .map_err(|e| MirrorError::io("set permissions on", dst, e))?;

    debug!(
        "Reversed file {} -> {} ({} bytes)",
        src.display(),
        dst.display(),
        size
    );
    Ok(size)
}
