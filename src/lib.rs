//! Library crate for glance
//!
//! This exposes the listing pipeline for the binary, tests and benchmarks.
//!
//! # Features
//!
//! - **Sorting**: stable ordering by name, size, time, kind or extension
//! - **Layouts**: grid sized to the terminal, aligned long table, tree
//! - **Colour**: `LS_COLORS`-aware, escape-free when not on a terminal
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Listing switches and layout policy
//! - [`data`]: Core data structures (`Entry`, `Metadata`, `EntryKind`)
//! - [`scan`]: Directory reading, filtering and name decoration
//! - [`sort`]: Entry ordering
//! - [`tree`]: Tree construction
//! - [`output`]: Grid, long and tree renderers
//! - [`listing`]: The end-to-end pipeline
//! - [`utils`]: Width, size, time and permission helpers

pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod identity;
pub mod listing;
pub mod logging;
pub mod output;
pub mod scan;
pub mod sort;
pub mod tree;
pub mod utils;

pub use cli::{Args, SortKey};
pub use color::Colorizer;
pub use config::Config;
pub use data::{Entry, EntryKind, Metadata};
pub use error::ListError;
pub use listing::Listing;
