//! Top-level listing pipeline.
//!
//! [`Listing`] ties the stages together for one invocation: read the
//! directory, optionally build a tree, render, write, and optionally repeat
//! for each subdirectory in recursive mode.

use crate::color::Colorizer;
use crate::config::Config;
use crate::data::Entry;
use crate::error::{ListError, Result};
use crate::output;
use crate::scan::Scanner;
use crate::tree::build_tree;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One listing invocation.
pub struct Listing<'a> {
    config: &'a Config,
    colorizer: &'a Colorizer,
    scanner: Scanner<'a>,
    term_width: usize,
    now: DateTime<Local>,
    visited: HashSet<PathBuf>,
}

impl<'a> Listing<'a> {
    pub fn new(config: &'a Config, colorizer: &'a Colorizer, term_width: usize) -> Self {
        Self {
            config,
            colorizer,
            scanner: Scanner::new(config, colorizer),
            term_width,
            now: Local::now(),
            visited: HashSet::new(),
        }
    }

    /// Overrides the reference time used for the current-year check.
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Lists `path` into `out`.
    ///
    /// In recursive mode every subdirectory follows under a `\n<path>:`
    /// header. Subdirectories that cannot be read are reported and skipped.
    ///
    /// # Errors
    /// Returns an error if `path` cannot be listed or `out` cannot be
    /// written.
    pub fn write(&mut self, path: &Path, out: &mut impl Write) -> Result<()> {
        let entries = self.scanner.read_entries(path)?;
        self.write_entries(path, entries, out)
    }

    fn write_entries(
        &mut self,
        path: &Path,
        mut entries: Vec<Entry>,
        out: &mut impl Write,
    ) -> Result<()> {
        if self.config.builds_tree() {
            entries = build_tree(path, entries, &mut self.scanner)?;
        }

        let text = output::render(
            &entries,
            self.config,
            self.colorizer,
            self.term_width,
            self.now,
        );
        out.write_all(text.as_bytes())?;

        if !self.config.recurses() {
            return Ok(());
        }

        let key = canonical(path);
        self.visited.insert(key.clone());
        for entry in entries.iter().filter(|e| e.is_dir()) {
            let subdir = entry.path();
            writeln!(out, "\n{}:", subdir.display())?;
            if self.visited.contains(&canonical(&subdir)) {
                warn!("not descending into {}: already visited", subdir.display());
                continue;
            }
            let listed = self
                .scanner
                .read_dir_entries(&subdir)
                .and_then(|children| self.write_entries(&subdir, children, out));
            match listed {
                Err(ListError::Io(e)) => return Err(ListError::Io(e)),
                Err(e) => warn!("{}", e),
                Ok(()) => {}
            }
        }
        self.visited.remove(&key);
        Ok(())
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
