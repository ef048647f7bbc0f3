//! Tree output formatter.

use crate::data::Entry;

/// Renders one entry per line, each line being the entry's tree prefix
/// followed by its display name.
pub fn render(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.display());
        out.push('\n');
    }
    out
}
