//! Terminal colouring for listing output.
//!
//! All colouring goes through [`Colorizer::colorize`], which wraps text in an
//! SGR start/reset pair or returns it untouched when colour is disabled.
//! Entry names resolve their colour in three steps:
//!
//! 1. exact extension match in the `LS_COLORS` overrides (`*.rs=...`)
//! 2. entry kind match in the same overrides (`di=...`, `ln=...`)
//! 3. the built-in fallback for the kind

use crate::data::EntryKind;
use crossterm::tty::IsTty;
use std::collections::HashMap;

const RESET: &str = "\x1b[0m";

/// Parsed `LS_COLORS` overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    codes: HashMap<String, String>,
}

impl Palette {
    /// Parses a colon-separated `key=code` list. Malformed items are ignored;
    /// extension keys are matched case-insensitively.
    pub fn parse(ls_colors: &str) -> Self {
        let codes = ls_colors
            .split(':')
            .filter_map(|item| item.split_once('='))
            .filter(|(key, code)| !key.is_empty() && !code.is_empty())
            .map(|(key, code)| {
                let key = if key.starts_with("*.") {
                    key.to_lowercase()
                } else {
                    key.to_string()
                };
                (key, code.to_string())
            })
            .collect();
        Self { codes }
    }

    /// Reads overrides from the `LS_COLORS` environment variable.
    pub fn from_env() -> Self {
        std::env::var("LS_COLORS")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.codes.get(key).map(String::as_str)
    }
}

/// Magnitude of a byte count, one tier per base-1024 unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    Bytes,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
}

impl SizeTier {
    pub fn of(bytes: u64) -> Self {
        match bytes {
            b if b < 1 << 10 => SizeTier::Bytes,
            b if b < 1 << 20 => SizeTier::Kilo,
            b if b < 1 << 30 => SizeTier::Mega,
            b if b < 1 << 40 => SizeTier::Giga,
            b if b < 1 << 50 => SizeTier::Tera,
            b if b < 1 << 60 => SizeTier::Peta,
            _ => SizeTier::Exa,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            SizeTier::Bytes => "32",
            SizeTier::Kilo => "1;32",
            SizeTier::Mega => "36",
            SizeTier::Giga => "1;36",
            SizeTier::Tera => "33",
            SizeTier::Peta => "1;33",
            SizeTier::Exa => "1;31",
        }
    }
}

/// What a piece of text represents, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Kind(EntryKind),
    Read,
    Write,
    Execute,
    /// File type character and `-` in permission strings.
    PermOther,
    Owner,
    Group,
    Modified,
    Size(SizeTier),
    /// Fields of rows whose real metadata is unavailable.
    Placeholder,
}

fn fallback_code(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "34",
        EntryKind::Symlink => "36",
        EntryKind::Executable => "32",
        EntryKind::BrokenSymlink => "31",
        EntryKind::Regular => "0",
    }
}

/// Applies ANSI colours, or nothing when disabled.
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    enabled: bool,
    palette: Palette,
}

impl Colorizer {
    pub fn new(enabled: bool, palette: Palette) -> Self {
        Self { enabled, palette }
    }

    /// A colorizer that never emits escape sequences.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Colour is enabled only when stdout is a terminal, `no_color` is unset
    /// and the `NO_COLOR` environment variable is empty or absent.
    pub fn from_env(no_color: bool) -> Self {
        let env_disabled = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let enabled = !no_color && !env_disabled && std::io::stdout().is_tty();
        Self::new(enabled, Palette::from_env())
    }

    /// Wraps `text` in the colour for `style`.
    pub fn colorize(&self, style: Style, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let code = match style {
            Style::Kind(kind) => self.kind_code(kind),
            Style::Read => "33",
            Style::Write => "31",
            Style::Execute => "32",
            Style::PermOther => "90",
            Style::Owner => "1;33",
            Style::Group => "1;35",
            Style::Modified => "34",
            Style::Size(tier) => tier.code(),
            Style::Placeholder => "90",
        };
        self.wrap(code, text)
    }

    /// Colours an entry name, preferring an extension override for `name`.
    pub fn colorize_name(&self, kind: EntryKind, name: &str, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let ext = crate::data::extension_of(name);
        if !ext.is_empty() {
            let key = format!("*.{}", ext.to_lowercase());
            if let Some(code) = self.palette.get(&key) {
                return self.wrap(code, text);
            }
        }
        self.colorize(Style::Kind(kind), text)
    }

    /// Colours each character of a permission string.
    pub fn colorize_permissions(&self, perms: &str) -> String {
        if !self.enabled {
            return perms.to_string();
        }
        perms
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let style = match c {
                    _ if i == 0 => Style::PermOther,
                    'r' => Style::Read,
                    'w' => Style::Write,
                    'x' | 's' | 'S' | 't' | 'T' => Style::Execute,
                    _ => Style::PermOther,
                };
                self.colorize(style, c.encode_utf8(&mut [0; 4]))
            })
            .collect()
    }

    /// Colours a formatted size by the magnitude of `bytes`.
    pub fn colorize_size(&self, bytes: u64, text: &str) -> String {
        self.colorize(Style::Size(SizeTier::of(bytes)), text)
    }

    fn kind_code(&self, kind: EntryKind) -> &str {
        self.palette
            .get(kind.code())
            .unwrap_or_else(|| fallback_code(kind))
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if code.is_empty() || code == "0" {
            return text.to_string();
        }
        format!("\x1b[{}m{}{}", code, text, RESET)
    }
}
