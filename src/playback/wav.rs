//! WAV file export
//!
//! Every submitted tone is appended to a 16-bit mono WAV file. Writing is
//! synchronous, so each completion is already settled when it is returned and
//! the run proceeds as fast as the disk allows.

use super::{Completion, PlaybackSink};
use crate::synth::Waveform;
use crate::{Result, SpectoneError};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Renders tones into a WAV file
pub struct WavSink {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    path: PathBuf,
    sample_rate: u32,
    samples_written: u64,
}

impl WavSink {
    /// Create (or truncate) the output file
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = path.as_ref().to_path_buf();
        let writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| SpectoneError::AudioFile(format!("Failed to create WAV file: {e}")))?;

        Ok(Self {
            writer: Some(writer),
            path,
            sample_rate,
            samples_written: 0,
        })
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total samples written so far
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }
}

impl PlaybackSink for WavSink {
    fn submit(&mut self, waveform: &Waveform) -> Result<Completion> {
        if waveform.sample_rate() != self.sample_rate {
            return Err(SpectoneError::AudioFile(format!(
                "waveform sample rate {} does not match file rate {}",
                waveform.sample_rate(),
                self.sample_rate
            )));
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| SpectoneError::AudioFile("WAV file already finalized".into()))?;

        for sample in waveform.to_i16() {
            writer
                .write_sample(sample)
                .map_err(|e| SpectoneError::AudioFile(format!("Failed to write sample: {e}")))?;
        }
        self.samples_written += waveform.len() as u64;
        Ok(Completion::ready())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().map_err(|e| {
                SpectoneError::AudioFile(format!("Failed to finalize WAV file: {e}"))
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "wav file"
    }
}
