//! Output renderers for `glance` listings.
//!
//! Each renderer takes an already-sorted, decorated slice of entries and
//! returns the complete text for it. Renderers hold no state and never
//! write to the terminal themselves.
//!
//! # Available Renderers
//!
//! - **Grid**: names packed into columns sized to the terminal width
//! - **Long**: one aligned row of metadata per entry
//! - **Tree**: one prefixed line per entry

pub mod grid;
pub mod long;
pub mod tree;

use crate::color::Colorizer;
use crate::config::{Config, Layout};
use crate::data::Entry;
use chrono::{DateTime, Local};

/// Renders `entries` in the layout selected by `config`.
///
/// `term_width` is only used by the grid layout and `now` only by the
/// long layout.
pub fn render(
    entries: &[Entry],
    config: &Config,
    colorizer: &Colorizer,
    term_width: usize,
    now: DateTime<Local>,
) -> String {
    match config.layout() {
        Layout::Long => long::render(entries, config.header, config.dereference, colorizer, now),
        Layout::Tree => tree::render(entries),
        Layout::Grid => grid::render(entries, term_width),
    }
}
