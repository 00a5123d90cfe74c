//! Startup duration estimate
//!
//! A single pass over the byte stream before playback starts. The default rule
//! charges a byte that repeats its immediate predecessor two tone durations;
//! playback itself always charges one. The two totals therefore differ for any
//! file with repeated bytes, and the estimate is informational only.

use crate::source::ByteSource;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

/// Rule used to total up the estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateStrategy {
    /// A byte equal to the previous byte counts double
    #[default]
    RepeatDoubling,
    /// Every byte counts once, matching actual playback
    PerByte,
}

impl FromStr for EstimateStrategy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "repeat-doubling" | "doubling" => Ok(EstimateStrategy::RepeatDoubling),
            "per-byte" | "actual" => Ok(EstimateStrategy::PerByte),
            _ => Err(format!(
                "unknown estimate rule '{value}' (repeat-doubling, per-byte)"
            )),
        }
    }
}

impl EstimateStrategy {
    /// String form used by the CLI and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateStrategy::RepeatDoubling => "repeat-doubling",
            EstimateStrategy::PerByte => "per-byte",
        }
    }
}

/// Result of the pre-pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationEstimate {
    /// Estimated total playback time in seconds
    pub seconds: f64,
    /// Number of bytes scanned
    pub bytes: u64,
    /// Bytes equal to their immediate predecessor
    pub repeats: u64,
}

/// Scan the whole stream and total up the expected duration.
pub fn estimate_duration<R: Read>(
    source: ByteSource<R>,
    tone_duration: f64,
    strategy: EstimateStrategy,
) -> Result<DurationEstimate> {
    let mut estimate = DurationEstimate {
        seconds: 0.0,
        bytes: 0,
        repeats: 0,
    };
    let mut previous: Option<u8> = None;

    for byte in source {
        let byte = byte?;
        let repeated = previous == Some(byte);
        if repeated {
            estimate.repeats += 1;
        }
        estimate.seconds += match (strategy, repeated) {
            (EstimateStrategy::RepeatDoubling, true) => tone_duration * 2.0,
            _ => tone_duration,
        };
        estimate.bytes += 1;
        previous = Some(byte);
    }

    Ok(estimate)
}

/// Format seconds as `"{M} minutes and {S} seconds"`, truncating both parts.
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let rest = (seconds % 60.0).floor() as u64;
    format!("{minutes} minutes and {rest} seconds")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn estimate(bytes: &[u8], tone: f64, strategy: EstimateStrategy) -> DurationEstimate {
        let source = ByteSource::from_reader(Cursor::new(bytes.to_vec()), 64);
        estimate_duration(source, tone, strategy).unwrap()
    }

    #[test]
    fn repeat_doubles_contribution() {
        let est = estimate(&[0x00, 0x00, 0x01], 1.0, EstimateStrategy::RepeatDoubling);
        assert_relative_eq!(est.seconds, 4.0);
        assert_eq!(est.bytes, 3);
        assert_eq!(est.repeats, 1);
    }

    #[test]
    fn per_byte_matches_playback() {
        let est = estimate(&[0x00, 0x00, 0x01], 1.0, EstimateStrategy::PerByte);
        assert_relative_eq!(est.seconds, 3.0);
        assert_eq!(est.repeats, 1);
    }

    #[test]
    fn runs_compare_against_immediate_predecessor() {
        // every byte after the first repeats its predecessor
        let est = estimate(&[7; 5], 0.5, EstimateStrategy::RepeatDoubling);
        assert_relative_eq!(est.seconds, 0.5 + 4.0 * 1.0);

        // alternating bytes never repeat
        let est = estimate(&[1, 2, 1, 2], 0.5, EstimateStrategy::RepeatDoubling);
        assert_relative_eq!(est.seconds, 2.0);
        assert_eq!(est.repeats, 0);
    }

    #[test]
    fn empty_stream_estimates_zero() {
        let est = estimate(&[], 1.0, EstimateStrategy::RepeatDoubling);
        assert_eq!(est.seconds, 0.0);
        assert_eq!(est.bytes, 0);
    }

    #[test]
    fn estimate_is_bit_identical_across_runs() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 13) as u8).collect();
        let a = estimate(&data, 0.06, EstimateStrategy::RepeatDoubling);
        let b = estimate(&data, 0.06, EstimateStrategy::RepeatDoubling);
        assert_eq!(a.seconds.to_bits(), b.seconds.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(0.0), "0 minutes and 0 seconds");
        assert_eq!(format_duration(59.9), "0 minutes and 59 seconds");
        assert_eq!(format_duration(61.0), "1 minutes and 1 seconds");
        assert_eq!(format_duration(3725.4), "62 minutes and 5 seconds");
    }

    #[test]
    fn strategy_parses_cli_values() {
        assert_eq!(
            "Repeat-Doubling".parse::<EstimateStrategy>(),
            Ok(EstimateStrategy::RepeatDoubling)
        );
        assert_eq!(
            "per-byte".parse::<EstimateStrategy>(),
            Ok(EstimateStrategy::PerByte)
        );
        assert!("guess".parse::<EstimateStrategy>().is_err());
        assert_eq!(EstimateStrategy::PerByte.as_str(), "per-byte");
    }
}
