//! Run configuration
//!
//! Everything the pipeline needs to know is carried by [`PlayerConfig`] and handed
//! to the orchestrator at construction; nothing is read from process-wide state.

use crate::estimate::EstimateStrategy;
use crate::synth::MAX_TONE_SAMPLES;
use crate::terminal::{ColorMode, Palette};
use crate::{Result, SpectoneError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Base tempo in beats per minute
pub const DEFAULT_BPM: f64 = 100.0;

/// Speed-up applied on top of the base tempo
pub const DEFAULT_BPM_MULTIPLIER: f64 = 10.0;

/// Playback sample rate (16 kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Read size used by the byte source
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Width of the per-byte spectrum bar in cells
pub const DEFAULT_SPECTRUM_WIDTH: usize = 80;

/// Pause between printing the estimate and starting playback
pub const DEFAULT_STARTUP_PAUSE_MS: u64 = 1300;

/// How the orchestrator schedules synthesis relative to playback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    /// Synthesize and play one byte at a time (next byte prepared while the current tone plays)
    #[default]
    Streaming,
    /// Read the whole file and synthesize every waveform before the first tone plays
    Batch,
}

/// Configuration for a sonification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Base tempo in beats per minute
    pub bpm: f64,
    /// Multiplier applied to `bpm` to get the effective tempo
    pub bpm_multiplier: f64,
    /// Sample rate of synthesized waveforms in Hz
    pub sample_rate: u32,
    /// Colors used for scroll rows and the spectrum bar
    pub palette: Palette,
    /// Read size of the byte source in bytes
    pub chunk_size: usize,
    /// Streaming or batch scheduling
    pub mode: PlaybackMode,
    /// Rule used by the startup duration estimate
    pub estimate: EstimateStrategy,
    /// ANSI escape codes or plain glyphs
    pub color: ColorMode,
    /// Print the per-byte spectrum bar before each scroll render
    pub spectrum: bool,
    /// Width of the spectrum bar in cells
    pub spectrum_width: usize,
    /// Pause after the estimate, in milliseconds
    pub startup_pause_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            bpm_multiplier: DEFAULT_BPM_MULTIPLIER,
            sample_rate: DEFAULT_SAMPLE_RATE,
            palette: Palette::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            mode: PlaybackMode::default(),
            estimate: EstimateStrategy::default(),
            color: ColorMode::default(),
            spectrum: false,
            spectrum_width: DEFAULT_SPECTRUM_WIDTH,
            startup_pause_ms: DEFAULT_STARTUP_PAUSE_MS,
        }
    }
}

impl PlayerConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SpectoneError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            SpectoneError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the base tempo
    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Set the tempo multiplier
    pub fn with_bpm_multiplier(mut self, multiplier: f64) -> Self {
        self.bpm_multiplier = multiplier;
        self
    }

    /// Set the scheduling mode
    pub fn with_mode(mut self, mode: PlaybackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the estimate rule
    pub fn with_estimate(mut self, estimate: EstimateStrategy) -> Self {
        self.estimate = estimate;
        self
    }

    /// Set the terminal color mode
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable the per-byte spectrum bar
    pub fn with_spectrum(mut self, enable: bool) -> Self {
        self.spectrum = enable;
        self
    }

    /// Set the startup pause
    pub fn with_startup_pause(mut self, pause: Duration) -> Self {
        self.startup_pause_ms = pause.as_millis() as u64;
        self
    }

    /// Effective tempo: `bpm * bpm_multiplier`
    pub fn effective_bpm(&self) -> f64 {
        self.bpm * self.bpm_multiplier
    }

    /// Seconds per tone: `60 / effective_bpm`
    pub fn tone_duration(&self) -> f64 {
        60.0 / self.effective_bpm()
    }

    /// Pause after the estimate
    pub fn startup_pause(&self) -> Duration {
        Duration::from_millis(self.startup_pause_ms)
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        let bpm = self.effective_bpm();
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(SpectoneError::Config(format!(
                "effective BPM must be positive, got {} x {}",
                self.bpm, self.bpm_multiplier
            )));
        }
        if self.sample_rate == 0 {
            return Err(SpectoneError::Config("sample rate must be positive".into()));
        }
        if self.chunk_size == 0 {
            return Err(SpectoneError::Config("chunk size must be positive".into()));
        }
        if self.sample_rate as f64 * self.tone_duration() > MAX_TONE_SAMPLES as f64 {
            return Err(SpectoneError::Config(format!(
                "tone duration of {} s is too long (effective BPM {} x {})",
                self.tone_duration(),
                self.bpm,
                self.bpm_multiplier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_tone_duration_is_sixty_milliseconds() {
        let config = PlayerConfig::default();
        assert_relative_eq!(config.effective_bpm(), 1000.0);
        assert_relative_eq!(config.tone_duration(), 0.06);
    }

    #[test]
    fn sixty_bpm_is_one_second_per_tone() {
        let config = PlayerConfig::default()
            .with_bpm(60.0)
            .with_bpm_multiplier(1.0);
        assert_relative_eq!(config.tone_duration(), 1.0);
    }

    #[test]
    fn rejects_non_positive_tempo() {
        assert!(PlayerConfig::default().with_bpm(0.0).validate().is_err());
        assert!(PlayerConfig::default()
            .with_bpm_multiplier(-1.0)
            .validate()
            .is_err());
        assert!(PlayerConfig::default()
            .with_bpm(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_tempo_too_slow_to_synthesize() {
        let config = PlayerConfig::default().with_bpm(1e-12);
        assert!(matches!(config.validate(), Err(SpectoneError::Config(_))));

        // one tone per minute is fine
        let config = PlayerConfig::default()
            .with_bpm(1.0)
            .with_bpm_multiplier(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_sample_rate_and_chunk() {
        let config = PlayerConfig {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlayerConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{ "bpm": 60.0, "mode": "batch", "estimate": "per-byte" }"#)
                .unwrap();
        assert_relative_eq!(config.bpm, 60.0);
        assert_eq!(config.mode, PlaybackMode::Batch);
        assert_eq!(config.estimate, EstimateStrategy::PerByte);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectone.json");
        std::fs::write(&path, r#"{ "bpm_multiplier": 2.0, "color": "plain" }"#).unwrap();

        let config = PlayerConfig::from_json_file(&path).unwrap();
        assert_relative_eq!(config.effective_bpm(), 200.0);
        assert_eq!(config.color, ColorMode::Plain);
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{ "bpm": 0.0 }"#).unwrap();

        assert!(matches!(
            PlayerConfig::from_json_file(&path),
            Err(SpectoneError::Config(_))
        ));
    }
}
