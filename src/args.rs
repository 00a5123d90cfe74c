//! Command-line argument parsing for the spectone CLI.

use clap::Parser;
use spectone::terminal::ColorMode;
use spectone::{EstimateStrategy, PlaybackMode, PlayerConfig};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "spectone", version)]
#[command(
    about = "Listen to and watch a binary file: one square-wave tone and one colored row per byte",
    long_about = None
)]
pub struct Args {
    /// File to play
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Base tempo in beats per minute (default 100)
    #[arg(long, value_name = "BPM")]
    pub bpm: Option<f64>,

    /// Multiplier applied to the base tempo (default 10)
    #[arg(long, value_name = "N")]
    pub bpm_multiplier: Option<f64>,

    /// Synthesize every tone before playback starts
    #[arg(long)]
    pub batch: bool,

    /// Estimate rule: repeat-doubling (default) or per-byte
    #[arg(long, value_name = "RULE", value_parser = parse_estimate)]
    pub estimate: Option<EstimateStrategy>,

    /// Print a spectrum bar (height = byte / 8) before each row
    #[arg(long)]
    pub spectrum: bool,

    /// Draw with plain glyphs instead of ANSI colors
    #[arg(long)]
    pub plain: bool,

    /// Keep the tempo but play no sound
    #[arg(long)]
    pub mute: bool,

    /// Render the tones to a WAV file instead of the speakers
    #[arg(long, value_name = "PATH")]
    pub wav: Option<PathBuf>,

    /// Start playing right after the estimate
    #[arg(long)]
    pub no_pause: bool,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_estimate(value: &str) -> Result<EstimateStrategy, String> {
    value.parse()
}

impl Args {
    /// Apply command-line overrides on top of a base configuration
    pub fn apply(&self, mut config: PlayerConfig) -> PlayerConfig {
        if let Some(bpm) = self.bpm {
            config.bpm = bpm;
        }
        if let Some(multiplier) = self.bpm_multiplier {
            config.bpm_multiplier = multiplier;
        }
        if self.batch {
            config.mode = PlaybackMode::Batch;
        }
        if let Some(estimate) = self.estimate {
            config.estimate = estimate;
        }
        if self.spectrum {
            config.spectrum = true;
        }
        if self.plain {
            config.color = ColorMode::Plain;
        }
        if self.no_pause {
            config.startup_pause_ms = 0;
        }
        config
    }
}
