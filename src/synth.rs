//! Square-wave synthesis
//!
//! One tone is a mono square wave sampled at a fixed rate and quantized to the
//! unsigned 8-bit range. Each buffer is normalized against its own minimum and
//! maximum, so the same rule applies to every tone in a run; a buffer with no
//! spread (silence, or a degenerate oscillator output) sits at the midpoint.

use crate::{Result, SpectoneError};
use std::f64::consts::TAU;
use std::time::Duration;

/// Unsigned 8-bit zero level
pub const SILENCE_LEVEL: u8 = 128;

/// Longest buffer a single tone may occupy: one hour at 16 kHz
pub const MAX_TONE_SAMPLES: usize = 16_000 * 3600;

/// A synthesized tone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    samples: Vec<u8>,
    sample_rate: u32,
}

impl Waveform {
    /// Wrap already quantized samples
    pub fn from_samples(samples: Vec<u8>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Unsigned 8-bit samples
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the waveform holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Widen to signed 16-bit, one output sample per input sample.
    ///
    /// The 8-bit midpoint becomes 0, so silence is silent on the device.
    pub fn to_i16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| (s as i16 - SILENCE_LEVEL as i16) << 8)
            .collect()
    }
}

/// Number of samples for a tone: `round(sample_rate * duration)`
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    (sample_rate as f64 * duration).round() as usize
}

/// Synthesize one tone.
///
/// `frequency == 0` yields a constant silence buffer without running the
/// oscillator. Non-positive or non-finite durations and a zero sample rate are
/// caller bugs and return [`SpectoneError::Synthesis`].
pub fn synthesize(frequency: u32, duration: f64, sample_rate: u32) -> Result<Waveform> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SpectoneError::Synthesis(format!(
            "tone duration must be positive, got {duration}"
        )));
    }
    if sample_rate == 0 {
        return Err(SpectoneError::Synthesis(
            "sample rate must be positive".into(),
        ));
    }

    if sample_rate as f64 * duration > MAX_TONE_SAMPLES as f64 {
        return Err(SpectoneError::Synthesis(format!(
            "tone of {duration} s at {sample_rate} Hz exceeds {MAX_TONE_SAMPLES} samples"
        )));
    }

    let count = sample_count(duration, sample_rate);
    if frequency == 0 {
        return Ok(Waveform::from_samples(
            vec![SILENCE_LEVEL; count],
            sample_rate,
        ));
    }

    let wave = square_wave(frequency as f64, count, sample_rate);
    Ok(Waveform::from_samples(normalize_u8(&wave), sample_rate))
}

/// `sign(sin(2π·f·k/rate))` for `k = 0..count`, with `sign(0) = 0`
fn square_wave(frequency: f64, count: usize, sample_rate: u32) -> Vec<f64> {
    let rate = sample_rate as f64;
    (0..count)
        .map(|k| {
            let v = (TAU * frequency * (k as f64 / rate)).sin();
            if v > 0.0 {
                1.0
            } else if v < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Rescale a buffer to 0-255 using its own min/max (truncating)
fn normalize_u8(wave: &[f64]) -> Vec<u8> {
    let (min, max) = wave
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if !(range > 0.0) {
        return vec![SILENCE_LEVEL; wave.len()];
    }
    wave.iter()
        .map(|&v| ((v - min) / range * 255.0) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 16_000;

    #[test]
    fn length_independent_of_frequency() {
        let expected = sample_count(0.06, RATE);
        assert_eq!(expected, 960);
        for freq in [0, 100, 4_400, 12_800, 25_500] {
            let wave = synthesize(freq, 0.06, RATE).unwrap();
            assert_eq!(wave.len(), expected, "frequency {freq}");
        }
    }

    #[test]
    fn length_rounds_to_nearest_sample() {
        assert_eq!(synthesize(100, 0.0001, RATE).unwrap().len(), 2);
        assert_eq!(synthesize(100, 0.00009, RATE).unwrap().len(), 1);
        assert_eq!(synthesize(100, 1.0 / 3.0, RATE).unwrap().len(), 5333);
    }

    #[test]
    fn silence_has_zero_variance() {
        let wave = synthesize(0, 0.5, RATE).unwrap();
        assert!(!wave.is_empty());
        assert!(wave.samples().iter().all(|&s| s == SILENCE_LEVEL));
        assert!(wave.to_i16().iter().all(|&s| s == 0));
    }

    #[test]
    fn square_wave_spans_full_range() {
        let wave = synthesize(1_000, 0.01, RATE).unwrap();
        let samples = wave.samples();
        // first sample sits on the zero crossing
        assert_eq!(samples[0], 127);
        assert!(samples.contains(&0));
        assert!(samples.contains(&255));
        assert!(samples[1..]
            .iter()
            .all(|&s| s == 0 || s == 255 || s == 127));
    }

    #[test]
    fn square_wave_period_matches_frequency() {
        // 1 kHz at 16 kHz: 8 samples high, 8 samples low
        let wave = synthesize(1_000, 0.01, RATE).unwrap();
        let samples = wave.samples();
        assert!(samples[1..8].iter().all(|&s| s == 255));
        assert!(samples[9..16].iter().all(|&s| s == 0));
    }

    #[test]
    fn widened_samples_are_centered() {
        let wave = Waveform::from_samples(vec![0, 128, 255], RATE);
        assert_eq!(wave.to_i16(), vec![-32768, 0, 32512]);
    }

    #[test]
    fn duration_round_trips_through_sample_count() {
        let wave = synthesize(440, 0.25, RATE).unwrap();
        assert_eq!(wave.duration(), Duration::from_millis(250));
        assert_eq!(wave.sample_rate(), RATE);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            synthesize(100, 0.0, RATE),
            Err(SpectoneError::Synthesis(_))
        ));
        assert!(matches!(
            synthesize(100, -1.0, RATE),
            Err(SpectoneError::Synthesis(_))
        ));
        assert!(matches!(
            synthesize(100, f64::INFINITY, RATE),
            Err(SpectoneError::Synthesis(_))
        ));
        assert!(matches!(
            synthesize(100, 0.1, 0),
            Err(SpectoneError::Synthesis(_))
        ));
    }

    #[test]
    fn oversized_tone_is_an_error_not_an_allocation() {
        assert!(matches!(
            synthesize(100, 1.0e13, RATE),
            Err(SpectoneError::Synthesis(_))
        ));
        assert!(matches!(
            synthesize(0, f64::MAX, RATE),
            Err(SpectoneError::Synthesis(_))
        ));
    }

    #[test]
    fn degenerate_buffer_sits_at_midpoint() {
        assert_eq!(normalize_u8(&[1.0, 1.0, 1.0]), vec![SILENCE_LEVEL; 3]);
        assert!(normalize_u8(&[]).is_empty());
    }
}
