//! Per-byte playback pipeline
//!
//! The [`Orchestrator`] drives `Idle → Streaming → Draining → Done`: for every
//! byte it derives the tone, synthesizes the waveform, scrolls one row, submits
//! the waveform to the sink and waits for its completion before the next byte
//! becomes visible or audible.

mod orchestrator;
mod signal;

pub use orchestrator::{Orchestrator, PipelineState, RunReport};
pub use signal::StopSignal;
