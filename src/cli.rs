//! CLI interface definitions for the `glance` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`SortKey`]: the ordering applied to each listed directory
//!
//! `Args` is converted once into a [`Config`] which the rest of the crate
//! consumes.
//!
//! # Example
//!
//! ```bash
//! glance -alF --kind --reverse ~/src
//! ```

use crate::config::Config;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line arguments for `glance`.
///
/// Short flags can be combined (`-alh`). `-h` selects the long-format
/// header, so help is only available as `--help`.
#[derive(Parser, Debug, Default)]
#[command(name = "glance", version, about, disable_help_flag = true)]
pub struct Args {
    /// Path to list (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Include hidden entries
    #[arg(short, long)]
    pub all: bool,

    /// Display as grid (default; overrides --tree)
    #[arg(short, long)]
    pub grid: bool,

    /// Detailed listing format
    #[arg(short, long)]
    pub long: bool,

    /// Show a header row for long format
    #[arg(short = 'h', long)]
    pub header: bool,

    /// Append file type indicators (/ @ *)
    #[arg(short = 'F', long)]
    pub classify: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Recursively display directory contents as a tree
    #[arg(short = 'T', long)]
    pub tree: bool,

    /// Show info for the symlink target, not the link itself
    #[arg(short = 'L', long)]
    pub dereference: bool,

    /// Sort by file size, largest first
    #[arg(short, long, group = "sort")]
    pub size: bool,

    /// Sort by modification time, newest first
    #[arg(short, long, group = "sort")]
    pub time: bool,

    /// Sort by kind, directories first
    #[arg(short, long, group = "sort")]
    pub kind: bool,

    /// Sort by file extension
    #[arg(short = 'x', long, group = "sort")]
    pub extension: bool,

    /// Reverse the sorting order
    #[arg(short, long)]
    pub reverse: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Ordering applied to the entries of one directory.
///
/// # Variants
/// * `Name` - Case-insensitive name order (default)
/// * `Size` - Largest first
/// * `Time` - Most recently modified first
/// * `Kind` - Directories first, then by name
/// * `Extension` - By extension, then by name
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Time,
    Kind,
    Extension,
}

impl Args {
    /// The sort key selected by the mutually exclusive sort flags.
    pub fn sort_key(&self) -> SortKey {
        if self.size {
            SortKey::Size
        } else if self.time {
            SortKey::Time
        } else if self.kind {
            SortKey::Kind
        } else if self.extension {
            SortKey::Extension
        } else {
            SortKey::Name
        }
    }

    /// Returns the path argument, or the current working directory.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("cannot get current directory"),
        }
    }

    pub fn to_config(&self) -> Config {
        Config {
            all: self.all,
            long: self.long,
            grid: self.grid,
            header: self.header,
            recurse: self.recursive,
            tree: self.tree,
            classify: self.classify,
            dereference: self.dereference,
            sort: self.sort_key(),
            reverse: self.reverse,
            no_color: self.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;

    #[test]
    fn test_combined_short_flags() {
        let args = Args::try_parse_from(["glance", "-alhF", "/tmp"]).unwrap();
        assert!(args.all && args.long && args.header && args.classify);
        assert_eq!(args.path, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_sort_flags_are_exclusive() {
        assert!(Args::try_parse_from(["glance", "-s", "-t"]).is_err());
        let args = Args::try_parse_from(["glance", "--extension", "-r"]).unwrap();
        assert_eq!(args.sort_key(), SortKey::Extension);
        assert!(args.reverse);
    }

    #[test]
    fn test_default_config() {
        let args = Args::try_parse_from(["glance"]).unwrap();
        let cfg = args.to_config();
        assert_eq!(cfg.layout(), Layout::Grid);
        assert!(!cfg.long);
        assert_eq!(cfg.sort, SortKey::Name);
    }

    #[test]
    fn test_layout_flags() {
        let layout = |argv: &[&str]| Args::try_parse_from(argv).unwrap().to_config().layout();
        assert_eq!(layout(&["glance", "-T"]), Layout::Tree);
        assert_eq!(layout(&["glance", "-gT"]), Layout::Grid);
        assert_eq!(layout(&["glance", "-glT"]), Layout::Long);
    }
}
