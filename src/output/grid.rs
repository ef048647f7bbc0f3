//! Grid output formatter.
//!
//! Names are laid out row-major: left to right, then top to bottom. Every
//! cell except the last of a row is padded to the widest name plus two
//! spaces.

use crate::data::Entry;
use crate::utils::{pad_right, visible_width};

const GUTTER: usize = 2;

/// Renders entry names as a grid fitting `term_width` columns.
///
/// Returns an empty string for an empty listing.
pub fn render(entries: &[Entry], term_width: usize) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let names: Vec<String> = entries.iter().map(Entry::display).collect();
    let max_len = names.iter().map(|n| visible_width(n)).max().unwrap_or(0);
    let cols = column_count(term_width, max_len, names.len());
    let cell = max_len + GUTTER;

    let mut out = String::with_capacity(names.len() * cell);
    for (i, name) in names.iter().enumerate() {
        let row_end = (i + 1) % cols == 0 || i + 1 == names.len();
        if row_end {
            out.push_str(name);
            out.push('\n');
        } else {
            out.push_str(&pad_right(name, cell));
        }
    }
    out
}

/// Number of columns: `term_width / (max_len + 2)`, clamped to
/// `1..=count`.
pub fn column_count(term_width: usize, max_len: usize, count: usize) -> usize {
    (term_width / (max_len + GUTTER)).clamp(1, count.max(1))
}
