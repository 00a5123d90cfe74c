//! Terminal visualization
//!
//! Scroll buffer, palette and renderer for the per-byte colored rows, plus the
//! one-time terminal geometry query.

pub mod geometry;
pub mod palette;
pub mod renderer;
pub mod scroll;

pub use geometry::TerminalGeometry;
pub use palette::{AnsiColor, ColorMode, Palette, RESET};
pub use renderer::Renderer;
pub use scroll::{Row, ScrollBuffer};
