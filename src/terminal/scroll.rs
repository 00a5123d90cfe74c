//! Fixed-height row history
//!
//! New rows enter at the bottom and the oldest row falls off the top, so the
//! buffer always holds exactly `rows` entries.

use std::collections::VecDeque;

/// One line of the scroll buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Initial filler: `columns` blank cells
    Blank,
    /// A single run of `columns - 1` cells in one palette slot
    Colored(usize),
}

impl Row {
    /// Palette slot of a colored row
    pub fn color_index(&self) -> Option<usize> {
        match self {
            Row::Blank => None,
            Row::Colored(index) => Some(*index),
        }
    }
}

/// Ring-like buffer of terminal rows
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    rows: VecDeque<Row>,
    columns: usize,
    pushes: u64,
}

impl ScrollBuffer {
    /// Create `rows` blank rows of `columns` cells (both clamped to at least 1)
    pub fn new(rows: usize, columns: usize) -> Self {
        let rows = rows.max(1);
        Self {
            rows: std::iter::repeat(Row::Blank).take(rows).collect(),
            columns: columns.max(1),
            pushes: 0,
        }
    }

    /// Append a colored row at the bottom and drop the top row
    pub fn push(&mut self, color_index: usize) {
        self.rows.pop_front();
        self.rows.push_back(Row::Colored(color_index));
        self.pushes += 1;
    }

    /// Number of rows (constant)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a scroll buffer holds at least one row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Terminal width the rows are sized for
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Cells in a colored run
    pub fn run_width(&self) -> usize {
        self.columns - 1
    }

    /// Total pushes since creation
    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    /// Rows from top (oldest) to bottom (newest)
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter()
    }
}
