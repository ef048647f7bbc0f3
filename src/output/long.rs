//! Long output formatter.
//!
//! Produces a summary line, an optional header and one aligned row per
//! entry: permissions, user, group, modification time, size and name.
//! Column widths are measured on visible width, so coloured cells align
//! the same as plain ones.

use crate::color::{Colorizer, Style};
use crate::data::Entry;
use crate::utils::{format_time, human_size, pad_left, pad_right, permission_string, visible_width};
use chrono::{DateTime, Local};
use std::fmt::Write;

const HEADERS: [&str; 6] = ["Permissions", "User", "Group", "Modified", "Size", "Name"];
const NONEXISTENT: &str = " [nonexist]";

/// One rendering-ready line of the table. Cells may contain colour codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub perms: String,
    pub user: String,
    pub group: String,
    pub modified: String,
    pub size: String,
    pub name: String,
    pub suffix: String,
}

/// Maximum visible width per padded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub perms: usize,
    pub user: usize,
    pub group: usize,
    pub modified: usize,
    pub size: usize,
}

impl ColumnWidths {
    /// Starts from the header label widths.
    pub fn from_headers() -> Self {
        Self {
            perms: HEADERS[0].len(),
            user: HEADERS[1].len(),
            group: HEADERS[2].len(),
            modified: HEADERS[3].len(),
            size: HEADERS[4].len(),
        }
    }

    /// Grows each width to fit `row`.
    pub fn fit(&mut self, row: &Row) {
        self.perms = self.perms.max(visible_width(&row.perms));
        self.user = self.user.max(visible_width(&row.user));
        self.group = self.group.max(visible_width(&row.group));
        self.modified = self.modified.max(visible_width(&row.modified));
        self.size = self.size.max(visible_width(&row.size));
    }
}

/// Renders `entries` as a long listing.
///
/// `dereference` marks broken links as `[nonexist]` rows with placeholder
/// fields; `now` decides which timestamps count as the current year.
pub fn render(
    entries: &[Entry],
    show_header: bool,
    dereference: bool,
    colorizer: &Colorizer,
    now: DateTime<Local>,
) -> String {
    let rows: Vec<Row> = entries
        .iter()
        .map(|e| build_row(e, dereference, colorizer, now))
        .collect();
    let mut widths = ColumnWidths::from_headers();
    for row in &rows {
        widths.fit(row);
    }

    let mut out = String::new();
    out.push_str(&summary(entries));
    out.push('\n');

    if show_header {
        let header = Row {
            perms: HEADERS[0].to_string(),
            user: HEADERS[1].to_string(),
            group: HEADERS[2].to_string(),
            modified: HEADERS[3].to_string(),
            size: HEADERS[4].to_string(),
            name: HEADERS[5].to_string(),
            suffix: String::new(),
        };
        format_row(&mut out, &header, &widths);
    }
    for row in &rows {
        format_row(&mut out, row, &widths);
    }
    out
}

/// `"N Files, SIZE"`, singular for exactly one entry. The total saturates
/// at `u64::MAX`.
pub fn summary(entries: &[Entry]) -> String {
    let noun = if entries.len() == 1 { "File" } else { "Files" };
    let total = entries
        .iter()
        .map(Entry::size)
        .fold(0u64, u64::saturating_add);
    format!("{} {}, {}", entries.len(), noun, human_size(total))
}

/// Projects an entry onto a table row.
pub fn build_row(
    entry: &Entry,
    dereference: bool,
    colorizer: &Colorizer,
    now: DateTime<Local>,
) -> Row {
    let name = entry.display();

    if let Some(link) = entry.link() {
        if link.broken && dereference {
            let dash = colorizer.colorize(Style::Placeholder, "-");
            return Row {
                perms: colorizer.colorize(Style::Placeholder, "----------"),
                user: dash.clone(),
                group: dash.clone(),
                modified: dash.clone(),
                size: dash,
                name,
                suffix: colorizer.colorize(Style::Placeholder, NONEXISTENT),
            };
        }
    }

    let meta = entry.meta();
    let (size, suffix) = match entry.link() {
        Some(link) if !link.followed => {
            (link.target.len() as u64, format!(" -> {}", link.target))
        }
        _ => (meta.size, String::new()),
    };

    Row {
        perms: colorizer.colorize_permissions(&permission_string(meta.mode)),
        user: colorizer.colorize(Style::Owner, &meta.owner),
        group: colorizer.colorize(Style::Group, &meta.group),
        modified: colorizer.colorize(Style::Modified, &format_time(meta.modified, now)),
        size: colorizer.colorize_size(size, &human_size(size)),
        name,
        suffix,
    }
}

fn format_row(out: &mut String, row: &Row, w: &ColumnWidths) {
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}{}",
        pad_right(&row.perms, w.perms),
        pad_right(&row.user, w.user),
        pad_right(&row.group, w.group),
        pad_right(&row.modified, w.modified),
        pad_left(&row.size, w.size),
        row.name,
        row.suffix,
    );
}
