//! Data structures for representing listed file system entries.
//!
//! An [`Entry`] is an explicit composition of the raw [`Metadata`] read from
//! the file system and the fields the formatting pipeline derives from it
//! (display name, tree prefix, symlink descriptor).

use chrono::{DateTime, Local};
use std::path::PathBuf;

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFLNK: u32 = 0o120000;

/// File metadata as consumed by the formatting pipeline.
///
/// # Fields
/// * `name` - Final path component, never empty
/// * `size` - Size in bytes
/// * `modified` - Last modification time
/// * `mode` - Raw `st_mode`, file type bits included
/// * `owner` - Owner name (or numeric uid when unresolvable)
/// * `group` - Group name (or numeric gid when unresolvable)
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub mode: u32,
    pub owner: String,
    pub group: String,
}

impl Metadata {
    pub fn is_dir(&self) -> bool {
        self.mode & S_IFMT == S_IFDIR
    }

    pub fn is_symlink(&self) -> bool {
        self.mode & S_IFMT == S_IFLNK
    }

    /// Any execute bit set on a non-directory.
    pub fn is_executable(&self) -> bool {
        !self.is_dir() && self.mode & 0o111 != 0
    }
}

/// Symlink descriptor attached to entries that were listed as links.
///
/// `followed` is set when the entry's metadata was replaced by the target's
/// (dereference mode); `broken` when the target could not be stat'ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symlink {
    pub target: String,
    pub broken: bool,
    pub followed: bool,
}

/// Closed classification of an entry, shared by colouring and classify
/// indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    Symlink,
    Executable,
    Regular,
    BrokenSymlink,
}

impl EntryKind {
    /// Two-letter `LS_COLORS` key for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            EntryKind::Directory => "di",
            EntryKind::Symlink => "ln",
            EntryKind::Executable => "ex",
            EntryKind::Regular => "fi",
            EntryKind::BrokenSymlink => "or",
        }
    }

    /// Trailing `-F` indicator, if any.
    pub fn indicator(&self) -> Option<char> {
        match self {
            EntryKind::Directory => Some('/'),
            EntryKind::Symlink | EntryKind::BrokenSymlink => Some('@'),
            EntryKind::Executable => Some('*'),
            EntryKind::Regular => None,
        }
    }
}

/// One file system object to display.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    meta: Metadata,
    dir: PathBuf,
    link: Option<Symlink>,
    display_name: Option<String>,
    tree_prefix: Option<String>,
}

impl Entry {
    /// Creates an entry for `meta`, listed from directory `dir`.
    pub fn new(meta: Metadata, dir: impl Into<PathBuf>) -> Self {
        Self {
            meta,
            dir: dir.into(),
            link: None,
            display_name: None,
            tree_prefix: None,
        }
    }

    pub fn with_link(mut self, link: Symlink) -> Self {
        self.link = Some(link);
        self
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn size(&self) -> u64 {
        self.meta.size
    }

    pub fn modified(&self) -> DateTime<Local> {
        self.meta.modified
    }

    pub fn is_dir(&self) -> bool {
        self.meta.is_dir()
    }

    /// Full path of the entry.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.meta.name)
    }

    pub fn link(&self) -> Option<&Symlink> {
        self.link.as_ref()
    }

    pub fn kind(&self) -> EntryKind {
        if self.link.as_ref().is_some_and(|l| l.broken) {
            return EntryKind::BrokenSymlink;
        }
        if self.meta.is_dir() {
            EntryKind::Directory
        } else if self.meta.is_symlink() {
            EntryKind::Symlink
        } else if self.meta.is_executable() {
            EntryKind::Executable
        } else {
            EntryKind::Regular
        }
    }

    /// Extension used for sorting and colouring: the part after the last `.`
    /// of the name, lowercased, empty when there is none.
    pub fn extension(&self) -> String {
        extension_of(&self.meta.name).to_lowercase()
    }

    pub fn set_display_name(&mut self, name: String) {
        self.display_name = Some(name);
    }

    /// Sets the tree prefix. Replaces any earlier prefix rather than stacking.
    pub fn set_tree_prefix(&mut self, prefix: String) {
        self.tree_prefix = Some(prefix);
    }

    pub fn tree_prefix(&self) -> Option<&str> {
        self.tree_prefix.as_deref()
    }

    /// Decorated name without the tree prefix.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.meta.name)
    }

    /// What renderers print in the name column: tree prefix + display name.
    pub fn display(&self) -> String {
        match &self.tree_prefix {
            Some(prefix) => format!("{}{}", prefix, self.display_name()),
            None => self.display_name().to_string(),
        }
    }
}

/// Portion of `name` after its last `.`, or `""` when there is no dot.
pub fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i + 1..]).unwrap_or("")
}
