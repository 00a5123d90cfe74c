//! Audio device integration using rodio
//!
//! Each tone is queued as its own 16-bit mono buffer, followed by a zero-length
//! callback source. Rodio reaches the callback exactly when the tone's last
//! sample has been handed to the device, which is what settles the completion.

use super::{Completion, PlaybackSink};
use crate::synth::Waveform;
use crate::{Result, SpectoneError};
use rodio::buffer::SamplesBuffer;
use rodio::source::EmptyCallback;
use rodio::{OutputStream, Sink};

/// Plays tones on the default output device
pub struct DeviceSink {
    _stream: OutputStream,
    sink: Sink,
    submitted: u64,
}

impl DeviceSink {
    /// Open the default output device
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            SpectoneError::AudioDevice(format!("Failed to create audio stream: {e}"))
        })?;
        let sink = Sink::try_new(&stream_handle).map_err(|e| {
            SpectoneError::AudioDevice(format!("Failed to create audio sink: {e}"))
        })?;

        Ok(DeviceSink {
            _stream: stream,
            sink,
            submitted: 0,
        })
    }

    /// Number of waveforms queued so far
    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl PlaybackSink for DeviceSink {
    fn submit(&mut self, waveform: &Waveform) -> Result<Completion> {
        let (completion, notifier) = Completion::pair();
        self.sink.append(SamplesBuffer::new(
            1,
            waveform.sample_rate(),
            waveform.to_i16(),
        ));
        self.sink
            .append(EmptyCallback::<i16>::new(Box::new(move || notifier.complete())));
        self.submitted += 1;
        Ok(completion)
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn finish(&mut self) -> Result<()> {
        self.sink.sleep_until_end();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "audio device"
    }
}

impl Drop for DeviceSink {
    fn drop(&mut self) {
        self.sink.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::synthesize;
    use std::time::Duration;

    fn try_device() -> Option<DeviceSink> {
        match DeviceSink::new() {
            Ok(device) => Some(device),
            Err(err) => {
                eprintln!("Skipping playback::device test (audio backend unavailable): {err}");
                None
            }
        }
    }

    #[test]
    fn tone_settles_completion() {
        let Some(mut device) = try_device() else {
            return;
        };
        let waveform = synthesize(440, 0.05, 16_000).unwrap();
        let completion = device.submit(&waveform).unwrap();
        assert!(completion.wait_timeout(Duration::from_secs(5)).is_some());
        assert_eq!(device.submitted(), 1);
    }

    #[test]
    fn stop_does_not_panic() {
        let Some(mut device) = try_device() else {
            return;
        };
        let waveform = synthesize(0, 0.5, 16_000).unwrap();
        let _completion = device.submit(&waveform).unwrap();
        device.stop();
    }
}
