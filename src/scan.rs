//! Directory reading for `glance`.
//!
//! This module handles:
//! - Single-level directory enumeration using `WalkDir`
//! - Hidden entry filtering
//! - Symlink target reading, broken link detection and dereferencing
//! - Owner/group resolution through an [`IdentityCache`]
//! - Sorting and display-name decoration of each listing
//!
//! Entries that vanish or cannot be stat'ed between enumeration and
//! inspection are skipped; only a failure on the listed path itself is
//! returned as an error.

use crate::color::Colorizer;
use crate::config::Config;
use crate::data::{Entry, Metadata, Symlink};
use crate::error::{ListError, Result};
use crate::identity::IdentityCache;
use crate::sort::sort_entries;
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;
use walkdir::WalkDir;

const QUOTED_CHARS: &str = " \t\n\x0b\x0c\r!@#$%^&*()[]{}<>?/|\\~`";

/// Reads directory listings and turns them into decorated [`Entry`] values.
pub struct Scanner<'a> {
    config: &'a Config,
    colorizer: &'a Colorizer,
    ids: IdentityCache,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a Config, colorizer: &'a Colorizer) -> Self {
        Self {
            config,
            colorizer,
            ids: IdentityCache::new(),
        }
    }

    /// Lists `path`, applying the hidden filter, sort order and name
    /// decoration from the configuration.
    ///
    /// `path` itself is not followed: if it is not a directory (a symlink
    /// included), the result is that single entry, or nothing when it is
    /// hidden and `all` is unset.
    ///
    /// # Errors
    /// Returns an error if `path` cannot be stat'ed or, for a directory,
    /// cannot be opened for reading.
    pub fn read_entries(&mut self, path: &Path) -> Result<Vec<Entry>> {
        let meta = fs::symlink_metadata(path).map_err(|source| ListError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        if !meta.is_dir() {
            let name = display_file_name(path);
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            return Ok(self.process_entry(path, &name, dir, &meta).into_iter().collect());
        }
        self.list_dir(path)
    }

    /// Lists the children of the directory at `path`, following `path` when
    /// it is a symlink. Used when descending into subdirectories, which may
    /// be dereferenced links.
    ///
    /// # Errors
    /// Returns an error if `path` does not resolve to a directory or cannot
    /// be opened for reading.
    pub fn read_dir_entries(&mut self, path: &Path) -> Result<Vec<Entry>> {
        let meta = fs::metadata(path).map_err(|source| ListError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(ListError::Stat {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }
        self.list_dir(path)
    }

    fn list_dir(&mut self, path: &Path) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        // WalkDir always follows a symlinked root
        for item in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let item = match item {
                Ok(item) => item,
                Err(e) if e.depth() == 0 => {
                    return Err(ListError::ReadDir {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let meta = match item.metadata() {
                Ok(meta) => meta,
                Err(e) => {
                    debug!("skipping {}: {}", item.path().display(), e);
                    continue;
                }
            };
            let name = item.file_name().to_string_lossy().into_owned();
            let dir = path.to_path_buf();
            if let Some(entry) = self.process_entry(item.path(), &name, dir, &meta) {
                entries.push(entry);
            }
        }

        if entries.len() > 1 {
            sort_entries(&mut entries, self.config.sort, self.config.reverse);
        }
        Ok(entries)
    }

    /// Builds the entry standing for a tree root, from followed metadata.
    ///
    /// The root is named by the last component of `path`, or by the path
    /// itself when it has none (`/`, `.`).
    pub fn root_entry(&mut self, path: &Path, meta: &fs::Metadata) -> Entry {
        let name = display_file_name(path);
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut entry = Entry::new(self.metadata(name, meta), dir);
        self.decorate(&mut entry);
        entry
    }

    /// Creates an entry, or `None` when it is filtered out or its symlink
    /// target cannot be read.
    fn process_entry(
        &mut self,
        full_path: &Path,
        name: &str,
        dir: PathBuf,
        meta: &fs::Metadata,
    ) -> Option<Entry> {
        if !self.config.all && name.starts_with('.') {
            return None;
        }

        let mut entry = if meta.file_type().is_symlink() {
            let target = match fs::read_link(full_path) {
                Ok(target) => target.to_string_lossy().into_owned(),
                Err(e) => {
                    debug!("skipping {}: cannot read link: {}", full_path.display(), e);
                    return None;
                }
            };
            match fs::metadata(full_path) {
                Ok(target_meta) if self.config.dereference => {
                    let link = Symlink {
                        target,
                        broken: false,
                        followed: true,
                    };
                    Entry::new(self.metadata(name.to_string(), &target_meta), dir).with_link(link)
                }
                resolved => {
                    let link = Symlink {
                        target,
                        broken: resolved.is_err(),
                        followed: false,
                    };
                    Entry::new(self.metadata(name.to_string(), meta), dir).with_link(link)
                }
            }
        } else {
            Entry::new(self.metadata(name.to_string(), meta), dir)
        };

        self.decorate(&mut entry);
        Some(entry)
    }

    fn metadata(&mut self, name: String, meta: &fs::Metadata) -> Metadata {
        let modified: DateTime<Local> = meta.modified().unwrap_or(UNIX_EPOCH).into();
        Metadata {
            name,
            size: meta.len(),
            modified,
            mode: meta.mode(),
            owner: self.ids.user(meta.uid()),
            group: self.ids.group(meta.gid()),
        }
    }

    fn decorate(&self, entry: &mut Entry) {
        let name = format_name(entry, self.config, self.colorizer);
        entry.set_display_name(name);
    }
}

/// Formats an entry's display name: quoted when it contains whitespace or
/// shell-special characters, coloured by kind, then suffixed with the
/// classify indicator when enabled.
pub fn format_name(entry: &Entry, config: &Config, colorizer: &Colorizer) -> String {
    let raw = entry.name();
    let quoted = if raw.contains(|c: char| QUOTED_CHARS.contains(c)) {
        format!("'{}'", raw)
    } else {
        raw.to_string()
    };

    let kind = entry.kind();
    let mut name = colorizer.colorize_name(kind, raw, &quoted);
    if config.classify {
        if let Some(indicator) = kind.indicator() {
            name.push(indicator);
        }
    }
    name
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
