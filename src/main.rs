//! revmirror - entry point for the CLI application

use anyhow::{Context, Result};
use clap::Parser;
use revmirror::cli::Args;
use revmirror::mirror_tree;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.output.log_level());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    args.validate()?;

    let (destination, stats) = mirror_tree(args.source(), args.output_dir(), &args.mirror_options())
        .with_context(|| format!("Failed to mirror {}", args.source().display()))?;

    info!("Mirrored {} into {}", args.source().display(), destination.display());
    info!("{stats}");
    Ok(())
}

fn setup_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
