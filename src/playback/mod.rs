//! Playback sinks
//!
//! A sink takes one finished waveform at a time and returns a [`Completion`]
//! that settles once the tone has played out. The pipeline never submits the
//! next waveform before the previous completion has settled.
//!
//! - [`ClockSink`]: silent, settles after the tone's duration has elapsed
//! - `DeviceSink` (feature `streaming`): plays through the default audio device via rodio
//! - `WavSink` (feature `export-wav`): appends every tone to a 16-bit mono WAV file

pub mod clock;
pub mod completion;
#[cfg(feature = "streaming")]
pub mod device;
#[cfg(feature = "export-wav")]
pub mod wav;

pub use clock::ClockSink;
pub use completion::{Completion, CompletionNotifier};
#[cfg(feature = "streaming")]
pub use device::DeviceSink;
#[cfg(feature = "export-wav")]
pub use wav::WavSink;

use crate::synth::Waveform;
use crate::Result;

/// Destination for synthesized tones
pub trait PlaybackSink {
    /// Start playing a waveform; the returned completion settles when it has finished.
    fn submit(&mut self, waveform: &Waveform) -> Result<Completion>;

    /// Abandon any tone that is still playing.
    fn stop(&mut self) {}

    /// Flush pending output once the last tone has completed.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Short label for logs and the run summary
    fn name(&self) -> &'static str;
}

impl<S: PlaybackSink + ?Sized> PlaybackSink for Box<S> {
    fn submit(&mut self, waveform: &Waveform) -> Result<Completion> {
        (**self).submit(waveform)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
