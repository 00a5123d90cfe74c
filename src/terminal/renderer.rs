//! Writes the scroll buffer and spectrum bars to the terminal
//!
//! Each frame is assembled into one string and written in a single call, then
//! flushed, so a frame never reaches the terminal half drawn.

use super::palette::{ColorMode, Palette, RESET};
use super::scroll::{Row, ScrollBuffer};
use crate::tone::Tone;
use crate::Result;
use std::io::Write;

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// Draws rows to any writer
pub struct Renderer<W: Write> {
    out: W,
    palette: Palette,
    mode: ColorMode,
    frame: String,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer writing to `out`
    pub fn new(out: W, palette: Palette, mode: ColorMode) -> Self {
        Self {
            out,
            palette,
            mode,
            frame: String::new(),
        }
    }

    /// Hide the cursor for the duration of the run (ANSI only)
    pub fn begin(&mut self) -> Result<()> {
        if self.mode == ColorMode::Ansi {
            self.out.write_all(HIDE_CURSOR.as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Write every row top to bottom, then flush
    pub fn render(&mut self, buffer: &ScrollBuffer) -> Result<()> {
        self.frame.clear();
        for row in buffer.rows() {
            match *row {
                Row::Blank => push_cells(&mut self.frame, ' ', buffer.columns()),
                Row::Colored(index) => self.push_run(index, buffer.run_width()),
            }
            self.frame.push('\n');
        }
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Print the byte's spectrum bar: `height + 1` lines of `width` cells
    pub fn spectrum(&mut self, tone: &Tone, width: usize) -> Result<()> {
        self.frame.clear();
        for _ in 0..=tone.height {
            self.push_run(tone.color_index, width);
            self.frame.push('\n');
        }
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Reset colors and show the cursor again
    pub fn restore(&mut self) -> Result<()> {
        if self.mode == ColorMode::Ansi {
            self.out.write_all(RESET.as_bytes())?;
            self.out.write_all(SHOW_CURSOR.as_bytes())?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn push_run(&mut self, index: usize, width: usize) {
        match self.mode {
            ColorMode::Ansi => {
                self.frame.push_str(self.palette.color(index).background());
                push_cells(&mut self.frame, ' ', width);
                self.frame.push_str(RESET);
            }
            ColorMode::Plain => push_cells(&mut self.frame, self.palette.glyph(index), width),
        }
    }
}

fn push_cells(frame: &mut String, cell: char, count: usize) {
    frame.extend(std::iter::repeat(cell).take(count));
}
