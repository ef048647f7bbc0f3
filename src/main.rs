//! Main entry point for the `glance` CLI application.
//!
//! `glance` lists directory contents as a grid, a detailed long table or a
//! tree, with optional colouring.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Resolves the path to list and the terminal capabilities
//! - Delegates reading, sorting and rendering to [`Listing`]
//!
//! # Flags of Interest
//! - `-l`, `-g`, `-T`: long, grid and tree layouts (grid is the default)
//! - `-s`, `-t`, `-k`, `-x`, `-r`: sort keys and reversal
//! - `-R`: recurse into subdirectories
//! - `--no-color`: never emit colour codes

use anyhow::{Context, Result};
use clap::Parser;
use glance::logging::init_logging;
use glance::utils::terminal_width;
use glance::{Args, Colorizer, Listing};
use std::io::{self, BufWriter, Write};
use tracing::warn;

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = args.to_config();
    if config.builds_tree() && config.recurse {
        warn!("--recursive has no effect together with --tree");
    } else if config.tree && !config.builds_tree() {
        warn!("--tree has no effect together with --grid");
    }

    let path = args.resolve_path()?;
    let colorizer = Colorizer::from_env(config.no_color);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    Listing::new(&config, &colorizer, terminal_width())
        .write(&path, &mut out)?;
    out.flush().context("failed to flush output")?;

    Ok(())
}
