//! Utility functions for the `glance` listing tool.
//!
//! This module provides:
//! - Visible width calculation that ignores ANSI escape sequences
//! - Width-aware padding helpers for column alignment
//! - Human-readable size and modification time formatting
//! - `ls`-style permission strings from raw mode bits
//! - Terminal width detection with an 80 column fallback

use chrono::{DateTime, Datelike, Local};
use crossterm::terminal;
use crossterm::tty::IsTty;
use tracing::debug;

const ESC: char = '\x1b';

/// Width used when the terminal size cannot be determined.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Returns the number of glyph positions `s` occupies on screen.
///
/// Escape sequences (`ESC [ ... final`) are skipped; every other code point
/// counts as one column. An unterminated sequence at the end of the string
/// is skipped to the end.
pub fn visible_width(s: &str) -> usize {
    if !s.contains(ESC) {
        return s.chars().count();
    }

    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != ESC {
            width += 1;
            continue;
        }
        // CSI runs to a final byte in '@'..='~'; anything else is a
        // two-character escape
        if let Some('[') = chars.next() {
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        }
    }
    width
}

/// Pads `s` on the right with spaces up to `width` visible columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Pads `s` on the left with spaces up to `width` visible columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.extend(std::iter::repeat_n(' ', pad));
    out.push_str(s);
    out
}

const KIB: u64 = 1 << 10;
const UNITS: [(u64, char); 6] = [
    (1 << 10, 'K'),
    (1 << 20, 'M'),
    (1 << 30, 'G'),
    (1 << 40, 'T'),
    (1 << 50, 'P'),
    (1 << 60, 'E'),
];

/// Formats a byte count with base-1024 units.
///
/// Below 1 KiB the exact count is printed without a suffix; above, the value
/// is scaled to the largest unit not exceeding it and printed with one
/// decimal digit (`1536` -> `"1.5K"`). `E` is the final unit.
pub fn human_size(size: u64) -> String {
    if size < KIB {
        return size.to_string();
    }
    let (base, suffix) = UNITS
        .windows(2)
        .find(|pair| size < pair[1].0)
        .map(|pair| pair[0])
        .unwrap_or(UNITS[UNITS.len() - 1]);
    format!("{:.1}{}", size as f64 / base as f64, suffix)
}

/// Formats a modification time the way `ls -l` does.
///
/// Times within the current calendar year of `now` render as
/// `"Mon DD HH:MM"`, older or future years as `"Mon DD  YYYY"`.
pub fn format_time(time: DateTime<Local>, now: DateTime<Local>) -> String {
    if time.year() == now.year() {
        time.format("%b %d %H:%M").to_string()
    } else {
        time.format("%b %d  %Y").to_string()
    }
}

/// Renders raw `st_mode` bits as a 10 character `ls` permission string.
pub fn permission_string(mode: u32) -> String {
    let kind = match mode & 0o170000 {
        0o040000 => 'd',
        0o120000 => 'l',
        0o010000 => 'p',
        0o140000 => 's',
        0o020000 => 'c',
        0o060000 => 'b',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    // (read, write, execute, special bit, special char)
    let triplets: [(u32, u32, u32, u32, char); 3] = [
        (0o400, 0o200, 0o100, 0o4000, 's'),
        (0o040, 0o020, 0o010, 0o2000, 's'),
        (0o004, 0o002, 0o001, 0o1000, 't'),
    ];
    for (r, w, x, special, special_char) in triplets {
        out.push(if mode & r != 0 { 'r' } else { '-' });
        out.push(if mode & w != 0 { 'w' } else { '-' });
        out.push(match (mode & x != 0, mode & special != 0) {
            (true, true) => special_char,
            (false, true) => special_char.to_ascii_uppercase(),
            (true, false) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// Returns the terminal width in columns, or [`DEFAULT_TERMINAL_WIDTH`] when
/// output is not a terminal or the size query fails.
pub fn terminal_width() -> usize {
    if !std::io::stdout().is_tty() {
        return DEFAULT_TERMINAL_WIDTH;
    }
    match terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        Ok(_) => DEFAULT_TERMINAL_WIDTH,
        Err(e) => {
            debug!("cannot get terminal size: {}", e);
            DEFAULT_TERMINAL_WIDTH
        }
    }
}
