//! ZX Spectrum-style palette approximated with ANSI background colors

use serde::{Deserialize, Serialize};

/// SGR reset, appended after every colored run
pub const RESET: &str = "\x1b[0m";

/// Glyphs used in plain mode, one per palette slot, darkest first
const PLAIN_GLYPHS: [char; 8] = [' ', '.', ':', '-', '=', '+', '*', '#'];

/// The eight ANSI background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnsiColor {
    /// SGR 40
    Black,
    /// SGR 41
    Red,
    /// SGR 42
    Green,
    /// SGR 43
    Yellow,
    /// SGR 44
    Blue,
    /// SGR 45
    Magenta,
    /// SGR 46
    Cyan,
    /// SGR 47
    White,
}

impl AnsiColor {
    /// SGR background escape for this color
    pub fn background(self) -> &'static str {
        match self {
            AnsiColor::Black => "\x1b[40m",
            AnsiColor::Red => "\x1b[41m",
            AnsiColor::Green => "\x1b[42m",
            AnsiColor::Yellow => "\x1b[43m",
            AnsiColor::Blue => "\x1b[44m",
            AnsiColor::Magenta => "\x1b[45m",
            AnsiColor::Cyan => "\x1b[46m",
            AnsiColor::White => "\x1b[47m",
        }
    }
}

/// Whether rows are drawn with escape codes or plain glyphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// ANSI SGR background colors
    #[default]
    Ansi,
    /// No escape codes; each palette slot gets its own glyph
    Plain,
}

/// Fixed, ordered set of eight colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub [AnsiColor; 8]);

impl Default for Palette {
    /// Black, blue, green, cyan, red, magenta, yellow, white
    fn default() -> Self {
        Palette([
            AnsiColor::Black,
            AnsiColor::Blue,
            AnsiColor::Green,
            AnsiColor::Cyan,
            AnsiColor::Red,
            AnsiColor::Magenta,
            AnsiColor::Yellow,
            AnsiColor::White,
        ])
    }
}

impl Palette {
    /// Color for a palette slot (wraps modulo 8)
    pub fn color(&self, index: usize) -> AnsiColor {
        self.0[index % self.0.len()]
    }

    /// Glyph for a palette slot in plain mode
    pub fn glyph(&self, index: usize) -> char {
        PLAIN_GLYPHS[index % PLAIN_GLYPHS.len()]
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a palette has eight slots
    pub fn is_empty(&self) -> bool {
        false
    }
}
