//! Binary file sonification and visualization
//!
//! Reads a file byte by byte and, for every byte, plays a square-wave tone and
//! scrolls one colored row through the terminal. The tone and the row of byte N
//! are fully retired before byte N+1 starts, so file order, visual order and
//! audible order always line up.
//!
//! # Pipeline
//! - [`source::ByteSource`]: sequential buffered reader over the target file
//! - [`tone`]: byte → frequency / palette slot / spectrum height
//! - [`synth::synthesize`]: frequency → 8-bit square wave
//! - [`terminal`]: scroll buffer, palette, renderer, geometry query
//! - [`playback`]: sinks that play a waveform and hand back a [`playback::Completion`]
//! - [`pipeline::Orchestrator`]: the state machine tying it all together
//! - [`estimate`]: informational pre-pass over the file
//!
//! # Crate feature flags
//! - `export-wav` (default): render tones to a WAV file (`playback::WavSink`)
//! - `streaming` (default): real-time audio output through rodio (`playback::DeviceSink`)
//!
//! # Quick start
//! ```no_run
//! use spectone::pipeline::Orchestrator;
//! use spectone::playback::ClockSink;
//! use spectone::source::ByteSource;
//! use spectone::terminal::TerminalGeometry;
//! use spectone::PlayerConfig;
//!
//! # fn main() -> spectone::Result<()> {
//! let config = PlayerConfig::default();
//! let source = ByteSource::open("firmware.bin", config.chunk_size)?;
//! let mut orchestrator = Orchestrator::new(
//!     config,
//!     TerminalGeometry::query(),
//!     std::io::stdout(),
//!     ClockSink::new(),
//! )?;
//! let report = orchestrator.run(source)?;
//! println!("{} tones", report.tones_played);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use std::path::PathBuf;

pub mod config;
pub mod estimate;
pub mod pipeline;
pub mod playback;
pub mod source;
pub mod synth;
pub mod terminal;
pub mod tone;

/// Error types for sonification runs
#[derive(thiserror::Error, Debug)]
pub enum SpectoneError {
    /// The input file does not exist
    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),

    /// IO error from the filesystem or the terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Waveform synthesis precondition violated
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    AudioFile(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for SpectoneError {
    /// Converts a String into `SpectoneError::Other`.
    ///
    /// Prefer the specific variants (`Config`, `Synthesis`, `AudioDevice`) where the
    /// failure category is known.
    fn from(msg: String) -> Self {
        SpectoneError::Other(msg)
    }
}

impl From<&str> for SpectoneError {
    fn from(msg: &str) -> Self {
        SpectoneError::Other(msg.to_string())
    }
}

/// Result type for sonification operations
pub type Result<T> = std::result::Result<T, SpectoneError>;

pub use config::{PlaybackMode, PlayerConfig};
pub use estimate::{estimate_duration, format_duration, DurationEstimate, EstimateStrategy};
pub use pipeline::{Orchestrator, PipelineState, RunReport, StopSignal};
pub use playback::{ClockSink, Completion, PlaybackSink};
pub use source::ByteSource;
pub use synth::{synthesize, Waveform};
pub use terminal::{Palette, Renderer, ScrollBuffer, TerminalGeometry};
pub use tone::Tone;

#[cfg(feature = "streaming")]
pub use playback::DeviceSink;
#[cfg(feature = "export-wav")]
pub use playback::WavSink;
