//! Tree building for `--tree` listings.
//!
//! The tree is flattened into a single depth-first, pre-order sequence of
//! entries, each carrying its connector prefix. Subdirectories are read
//! through the same [`Scanner`] as the top level, so they are filtered,
//! sorted and decorated identically.

use crate::data::Entry;
use crate::error::{ListError, Result};
use crate::scan::Scanner;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Decorates `entries`, the listing of `root`, as a tree.
///
/// If `root` is not a directory, `entries` are returned unchanged. Otherwise
/// the result starts with an entry for `root` itself (empty prefix) followed
/// by every descendant. Subdirectories that cannot be read keep their own
/// line but contribute no children.
///
/// # Errors
/// Returns an error if `root` cannot be stat'ed.
pub fn build_tree(root: &Path, entries: Vec<Entry>, scanner: &mut Scanner) -> Result<Vec<Entry>> {
    let meta = fs::metadata(root).map_err(|source| ListError::Stat {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Ok(entries);
    }

    let mut root_entry = scanner.root_entry(root, &meta);
    root_entry.set_tree_prefix(String::new());

    let mut builder = TreeBuilder {
        scanner,
        ancestors: HashSet::new(),
        result: vec![root_entry],
    };
    builder.enter(root);
    builder.add_children(entries, "");
    Ok(builder.result)
}

struct TreeBuilder<'s, 'a> {
    scanner: &'s mut Scanner<'a>,
    /// Canonical paths of the directories currently being expanded.
    ancestors: HashSet<PathBuf>,
    result: Vec<Entry>,
}

impl TreeBuilder<'_, '_> {
    fn add_children(&mut self, entries: Vec<Entry>, prefix: &str) {
        let count = entries.len();
        for (i, mut entry) in entries.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            entry.set_tree_prefix(format!("{}{}", prefix, connector));

            let subdir = entry.is_dir().then(|| entry.path());
            self.result.push(entry);

            if let Some(path) = subdir {
                let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
                self.descend(&path, &child_prefix);
            }
        }
    }

    fn descend(&mut self, path: &Path, prefix: &str) {
        if !self.enter(path) {
            warn!("not descending into {}: already visited", path.display());
            return;
        }
        match self.scanner.read_dir_entries(path) {
            Ok(children) => self.add_children(children, prefix),
            Err(e) => warn!("{}", e),
        }
        self.leave(path);
    }

    /// Marks `path` as being expanded. Returns false if it already is, which
    /// means a symlink loops back to an ancestor.
    fn enter(&mut self, path: &Path) -> bool {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.ancestors.insert(key)
    }

    fn leave(&mut self, path: &Path) {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.ancestors.remove(&key);
    }
}
