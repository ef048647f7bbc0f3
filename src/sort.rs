//! Stable ordering of listed entries.
//!
//! Every key uses a stable sort, so entries that compare equal keep their
//! enumeration order. Reversal is a final whole-sequence reversal, never a
//! flipped comparator: reversing a kind sort lists files first, then
//! directories, each group in reverse name order.

use crate::cli::SortKey;
use crate::data::Entry;
use std::cmp::Ordering;

/// Sorts `entries` in place by `key`, then reverses if requested.
///
/// # Behavior
/// * `SortKey::Name` - Case-insensitive by name
/// * `SortKey::Size` - Largest first
/// * `SortKey::Time` - Newest first, compared at second resolution
/// * `SortKey::Kind` - Directories first, then case-insensitive by name
/// * `SortKey::Extension` - Case-insensitive by extension, then by name
pub fn sort_entries(entries: &mut [Entry], key: SortKey, reverse: bool) {
    match key {
        SortKey::Name => entries.sort_by_cached_key(|e| e.name().to_lowercase()),
        SortKey::Size => entries.sort_by(|a, b| b.size().cmp(&a.size())),
        SortKey::Time => {
            entries.sort_by(|a, b| b.modified().timestamp().cmp(&a.modified().timestamp()))
        }
        SortKey::Kind => entries.sort_by(by_kind),
        SortKey::Extension => {
            entries.sort_by_cached_key(|e| (e.extension(), e.name().to_lowercase()))
        }
    }
    if reverse {
        entries.reverse();
    }
}

fn by_kind(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
    }
}
