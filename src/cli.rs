//! Command-line interface definitions
//!
//! Arguments are grouped by the component that consumes them.

use crate::copy::MAX_CHUNK_SIZE;
use crate::directory::{MirrorOptions, PLATFORM_PATH_MAX};
use crate::name::NameMode;
use anyhow::Result;
use clap::Parser;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Mirror a directory with every file's content and every name reversed
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source and output paths
    #[command(flatten)]
    pub paths: PathConfig,

    /// File reversal configuration
    #[command(flatten)]
    pub io: IoConfig,

    /// Traversal configuration
    #[command(flatten)]
    pub traversal: TraversalConfig,

    /// Output and logging configuration
    #[command(flatten)]
    pub output: OutputConfig,
}

// ============================================================================
// FUNCTIONAL GROUPS: Organized by what component consumes them
// ============================================================================

/// Paths configuration
///
/// Used by: `main()`, `mirror_tree()`
#[derive(clap::Args, Debug, Clone)]
pub struct PathConfig {
    /// Source directory
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory in which the mirrored tree is created
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// File reversal configuration
///
/// Used by: `reverse_file()`
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "I/O Options")]
pub struct IoConfig {
    /// Chunk size in bytes for reading files back to front
    #[arg(long, value_name = "BYTES", default_value = "4096")]
    pub chunk_size: usize,
}

/// Traversal configuration
///
/// Used by: the directory walk
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Traversal Options")]
pub struct TraversalConfig {
    /// How entry names are reversed
    #[arg(long, value_enum, default_value = "bytes")]
    pub name_mode: NameMode,

    /// Fail when a directory deeper than this level is reached (root is 0)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

/// Output and logging configuration
///
/// Used by: `main()`, logging initialization
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Output Options")]
pub struct OutputConfig {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl OutputConfig {
    /// Log level selected by `-v`/`-q`
    #[must_use]
    pub const fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

impl Args {
    /// Validate command-line arguments
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - Source path does not exist, cannot be accessed or is not a directory
    /// - Output directory does not exist, cannot be accessed or is not a
    ///   directory
    /// - Chunk size is 0 or larger than 64 MiB
    /// - Both --quiet and --verbose options are used
    pub fn validate(&self) -> Result<()> {
        let source = &self.paths.source;
        match fs::metadata(source) {
            Ok(metadata) if !metadata.is_dir() => {
                anyhow::bail!("Source path must be a directory: {}", source.display());
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                anyhow::bail!("Source path does not exist: {}", source.display());
            }
            Err(e) => {
                anyhow::bail!("Cannot access source path {}: {}", source.display(), e);
            }
        }

        let output_dir = &self.paths.output_dir;
        match fs::metadata(output_dir) {
            Ok(metadata) if !metadata.is_dir() => {
                anyhow::bail!(
                    "Output directory is not a directory: {}",
                    output_dir.display()
                );
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                anyhow::bail!("Output directory does not exist: {}", output_dir.display());
            }
            Err(e) => {
                anyhow::bail!(
                    "Cannot access output directory {}: {}",
                    output_dir.display(),
                    e
                );
            }
        }

        if self.io.chunk_size == 0 || self.io.chunk_size > MAX_CHUNK_SIZE {
            anyhow::bail!(
                "Chunk size must be between 1 and {} bytes, got: {}",
                MAX_CHUNK_SIZE,
                self.io.chunk_size
            );
        }

        if self.output.quiet && self.output.verbose > 0 {
            anyhow::bail!("Cannot use both --quiet and --verbose options");
        }

        Ok(())
    }

    /// Options for the mirroring walk
    #[must_use]
    pub const fn mirror_options(&self) -> MirrorOptions {
        MirrorOptions {
            chunk_size: self.io.chunk_size,
            name_mode: self.traversal.name_mode,
            max_depth: self.traversal.max_depth,
            path_limit: PLATFORM_PATH_MAX,
        }
    }

    /// Get source path
    #[must_use]
    pub const fn source(&self) -> &PathBuf {
        &self.paths.source
    }

    /// Get output directory
    #[must_use]
    pub const fn output_dir(&self) -> &PathBuf {
        &self.paths.output_dir
    }
}
