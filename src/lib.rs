//! revmirror - mirror a directory tree in reverse
//!
//! Given a source directory, revmirror builds a sibling tree in which every
//! file and directory name is reversed and every regular file holds its
//! source bytes in reverse order. Directory structure and permission bits
//! are preserved; symlinks, devices, FIFOs and sockets are skipped.
//!
//! # Example
//!
//! ```bash
//! # Creates ./atad mirroring /srv/data
//! revmirror /srv/data
//!
//! # Put the mirror somewhere else, reversing names by character
//! revmirror --name-mode chars -C /tmp /srv/data
//! ```
//!
//! Files are streamed from tail to head in fixed-size chunks, so memory use
//! does not depend on file size. The walk runs on an explicit stack and
//! stops at the first error, leaving already mirrored entries in place.

pub mod cli;
pub mod copy;
pub mod directory;
pub mod error;
pub mod name;

pub use directory::{mirror_directory, mirror_tree, MirrorOptions, MirrorStats};
pub use error::{ErrorKind, MirrorError, Result};
pub use name::NameMode;
