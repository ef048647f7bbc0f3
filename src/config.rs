//! Listing configuration.
//!
//! [`Config`] is built once from the command line and passed by reference to
//! every stage of the pipeline. It is never mutated during a listing.

use crate::cli::SortKey;

/// Display and sort switches for one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub all: bool,
    pub long: bool,
    pub grid: bool,
    pub header: bool,
    pub recurse: bool,
    pub tree: bool,
    pub classify: bool,
    pub dereference: bool,
    pub sort: SortKey,
    pub reverse: bool,
    pub no_color: bool,
}

/// How a listing is rendered once entries are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid,
    Long,
    Tree,
}

impl Config {
    /// `long` takes precedence over `grid`, and an explicit `grid` over
    /// `tree`. A tree rendered in long layout keeps its prefixes in the name
    /// column.
    pub fn layout(&self) -> Layout {
        if self.long {
            Layout::Long
        } else if self.tree && !self.grid {
            Layout::Tree
        } else {
            Layout::Grid
        }
    }

    /// Whether entries are expanded into a tree before rendering.
    pub fn builds_tree(&self) -> bool {
        self.tree && self.layout() != Layout::Grid
    }

    /// Recursive listing is suppressed while a tree is built.
    pub fn recurses(&self) -> bool {
        self.recurse && !self.builds_tree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_precedence() {
        let mut cfg = Config::default();
        assert_eq!(cfg.layout(), Layout::Grid);
        cfg.tree = true;
        assert_eq!(cfg.layout(), Layout::Tree);
        assert!(cfg.builds_tree());
        cfg.long = true;
        assert_eq!(cfg.layout(), Layout::Long);
        assert!(cfg.builds_tree());
    }

    #[test]
    fn test_explicit_grid_overrides_tree() {
        let mut cfg = Config {
            grid: true,
            tree: true,
            recurse: true,
            ..Config::default()
        };
        assert_eq!(cfg.layout(), Layout::Grid);
        assert!(!cfg.builds_tree());
        assert!(cfg.recurses());

        cfg.long = true;
        assert_eq!(cfg.layout(), Layout::Long);
        assert!(cfg.builds_tree());
        assert!(!cfg.recurses());
    }

    #[test]
    fn test_tree_suppresses_recurse() {
        let cfg = Config {
            recurse: true,
            tree: true,
            ..Config::default()
        };
        assert!(!cfg.recurses());
    }
}
