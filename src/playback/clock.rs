//! Silent sink that keeps real-time pacing

use super::{Completion, PlaybackSink};
use crate::synth::Waveform;
use crate::Result;
use std::thread;

/// Settles each tone after its nominal duration without producing sound.
///
/// Used when no audio device is available so the visuals still advance at the
/// configured tempo.
#[derive(Debug, Default)]
pub struct ClockSink {
    submitted: u64,
}

impl ClockSink {
    /// Create a clock sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of waveforms accepted so far
    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl PlaybackSink for ClockSink {
    fn submit(&mut self, waveform: &Waveform) -> Result<Completion> {
        let (completion, notifier) = Completion::pair();
        let duration = waveform.duration();
        thread::Builder::new()
            .name("spectone-clock".into())
            .spawn(move || {
                thread::sleep(duration);
                notifier.complete();
            })?;
        self.submitted += 1;
        Ok(completion)
    }

    fn name(&self) -> &'static str {
        "silent clock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn settles_after_tone_duration() {
        let mut sink = ClockSink::new();
        let waveform = Waveform::from_samples(vec![128; 480], 16_000); // 30 ms
        let start = Instant::now();
        let completion = sink.submit(&waveform).unwrap();
        completion.wait().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(sink.submitted(), 1);
    }

    #[test]
    fn empty_waveform_settles_immediately() {
        let mut sink = ClockSink::new();
        let completion = sink
            .submit(&Waveform::from_samples(Vec::new(), 16_000))
            .unwrap();
        assert!(completion.wait_timeout(Duration::from_secs(1)).is_some());
    }
}
