//! Terminal size, captured once at startup

use crossterm::terminal;

/// Fallback when the host cannot report a size (e.g. output is piped)
pub const FALLBACK_ROWS: usize = 24;
/// Fallback when the host cannot report a size
pub const FALLBACK_COLUMNS: usize = 80;

/// Rows and columns of the output terminal, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Number of text rows
    pub rows: usize,
    /// Number of text columns
    pub columns: usize,
}

impl TerminalGeometry {
    /// Build a geometry, clamping both dimensions to at least 1
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: rows.max(1),
            columns: columns.max(1),
        }
    }

    /// Ask the host for the current size.
    ///
    /// Later resizes are not tracked; the returned value is used for the whole run.
    pub fn query() -> Self {
        match terminal::size() {
            Ok((columns, rows)) => Self::new(rows as usize, columns as usize),
            Err(e) => {
                tracing::warn!(
                    "terminal size unavailable ({e}), using {FALLBACK_ROWS}x{FALLBACK_COLUMNS}"
                );
                Self::new(FALLBACK_ROWS, FALLBACK_COLUMNS)
            }
        }
    }
}

impl Default for TerminalGeometry {
    fn default() -> Self {
        Self::new(FALLBACK_ROWS, FALLBACK_COLUMNS)
    }
}
