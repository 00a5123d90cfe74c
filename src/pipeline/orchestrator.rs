//! Byte-by-byte orchestration
//!
//! Ordering contract: the row and the tone of byte N are pushed, rendered and
//! submitted only after the completion of byte N-1 has settled. In streaming
//! mode the next byte is read and synthesized while the current tone plays;
//! that work is invisible until the completion arrives.

use super::StopSignal;
use crate::config::{PlaybackMode, PlayerConfig};
use crate::playback::{Completion, PlaybackSink};
use crate::source::ByteSource;
use crate::synth::{synthesize, Waveform};
use crate::terminal::{Renderer, ScrollBuffer, TerminalGeometry};
use crate::tone::Tone;
use crate::{Result, SpectoneError};
use std::io::{Read, Write};
use std::time::{Duration, Instant};

/// How often a pending completion re-checks the stop signal
const STOP_POLL: Duration = Duration::from_millis(10);

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Buffer sized, tone duration known, stream open
    Idle,
    /// Bytes are being played
    Streaming,
    /// Stream exhausted or stopped; closing the source and flushing the sink
    Draining,
    /// Terminal state
    Done,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Every state the orchestrator passed through, in order
    pub transitions: Vec<PipelineState>,
    /// Tones whose playback completed
    pub tones_played: u64,
    /// Seconds per tone used for the run
    pub tone_duration: f64,
    /// Wall-clock time spent in `run`
    pub elapsed: Duration,
    /// True when the run ended on a stop request
    pub interrupted: bool,
    /// Label of the sink the tones went to
    pub sink: &'static str,
}

impl RunReport {
    /// Playback time charged by the pipeline: one tone duration per byte
    pub fn nominal_seconds(&self) -> f64 {
        self.tones_played as f64 * self.tone_duration
    }
}

struct PreparedTone {
    tone: Tone,
    waveform: Waveform,
}

#[derive(Default)]
struct Progress {
    tones: u64,
    interrupted: bool,
}

/// Drives the byte loop for one run
pub struct Orchestrator<W: Write, S: PlaybackSink> {
    config: PlayerConfig,
    tone_duration: f64,
    scroll: ScrollBuffer,
    renderer: Renderer<W>,
    sink: S,
    stop: StopSignal,
    state: PipelineState,
    transitions: Vec<PipelineState>,
}

impl<W: Write, S: PlaybackSink> Orchestrator<W, S> {
    /// Validate the configuration and prepare an idle orchestrator.
    ///
    /// The geometry is used as-is for the whole run.
    pub fn new(
        config: PlayerConfig,
        geometry: TerminalGeometry,
        out: W,
        sink: S,
    ) -> Result<Self> {
        config.validate()?;
        let tone_duration = config.tone_duration();
        let renderer = Renderer::new(out, config.palette, config.color);

        Ok(Self {
            tone_duration,
            scroll: ScrollBuffer::new(geometry.rows, geometry.columns),
            renderer,
            sink,
            stop: StopSignal::new(),
            state: PipelineState::Idle,
            transitions: vec![PipelineState::Idle],
            config,
        })
    }

    /// Use an externally owned stop signal (e.g. wired to Ctrl-C)
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Handle that stops this orchestrator
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Seconds per tone
    pub fn tone_duration(&self) -> f64 {
        self.tone_duration
    }

    /// Current scroll buffer
    pub fn scroll_buffer(&self) -> &ScrollBuffer {
        &self.scroll
    }

    /// Sink the tones are submitted to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Renderer (and through it, the output writer)
    pub fn renderer(&self) -> &Renderer<W> {
        &self.renderer
    }

    /// Play the whole stream. An orchestrator runs once.
    pub fn run<R: Read>(&mut self, source: ByteSource<R>) -> Result<RunReport> {
        if self.state != PipelineState::Idle {
            return Err(SpectoneError::Other(format!(
                "orchestrator already ran (state {:?})",
                self.state
            )));
        }

        let started = Instant::now();
        tracing::info!(
            mode = ?self.config.mode,
            sink = self.sink.name(),
            tone_duration = self.tone_duration,
            rows = self.scroll.len(),
            columns = self.scroll.columns(),
            "starting run"
        );

        self.renderer.begin()?;
        let outcome = match self.config.mode {
            PlaybackMode::Streaming => self.stream(source),
            PlaybackMode::Batch => self.batch(source),
        };
        let restored = self.renderer.restore();

        let progress = match outcome {
            Ok(progress) => progress,
            Err(e) => {
                self.sink.stop();
                return Err(e);
            }
        };
        restored?;

        if progress.interrupted {
            self.sink.stop();
        } else {
            self.sink.finish()?;
        }
        self.transition(PipelineState::Done);

        let report = RunReport {
            transitions: self.transitions.clone(),
            tones_played: progress.tones,
            tone_duration: self.tone_duration,
            elapsed: started.elapsed(),
            interrupted: progress.interrupted,
            sink: self.sink.name(),
        };
        tracing::info!(
            tones = report.tones_played,
            interrupted = report.interrupted,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "run finished"
        );
        Ok(report)
    }

    /// Read, synthesize and play one byte at a time
    fn stream<R: Read>(&mut self, mut source: ByteSource<R>) -> Result<Progress> {
        self.transition(PipelineState::Streaming);
        let mut progress = Progress::default();

        let mut next = self.prepare_next(&mut source)?;
        while let Some(prepared) = next {
            if self.stop.is_stopped() {
                progress.interrupted = true;
                break;
            }
            let completion = self.present(&prepared)?;
            // look-ahead: overlaps with playback, not shown or submitted yet.
            // A read failure surfaces only once the current tone has played out.
            let lookahead = self.prepare_next(&mut source);
            if !self.await_completion(&completion)? {
                progress.interrupted = true;
                break;
            }
            progress.tones += 1;
            next = lookahead?;
        }

        self.transition(PipelineState::Draining);
        drop(source);
        Ok(progress)
    }

    /// Synthesize every waveform up front, then play them in file order
    fn batch<R: Read>(&mut self, mut source: ByteSource<R>) -> Result<Progress> {
        self.transition(PipelineState::Streaming);
        let bytes = source.read_remaining()?;
        let prepared = bytes
            .into_iter()
            .map(|byte| self.prepare(byte))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(tones = prepared.len(), "batch synthesized");

        let mut progress = Progress::default();
        for tone in &prepared {
            if self.stop.is_stopped() {
                progress.interrupted = true;
                break;
            }
            let completion = self.present(tone)?;
            if !self.await_completion(&completion)? {
                progress.interrupted = true;
                break;
            }
            progress.tones += 1;
        }

        self.transition(PipelineState::Draining);
        drop(source);
        Ok(progress)
    }

    fn prepare_next<R: Read>(&self, source: &mut ByteSource<R>) -> Result<Option<PreparedTone>> {
        match source.next_byte()? {
            Some(byte) => self.prepare(byte).map(Some),
            None => Ok(None),
        }
    }

    fn prepare(&self, byte: u8) -> Result<PreparedTone> {
        let tone = Tone::from_byte(byte);
        let waveform = synthesize(tone.frequency, self.tone_duration, self.config.sample_rate)?;
        Ok(PreparedTone { tone, waveform })
    }

    /// Scroll, render and submit one tone
    fn present(&mut self, prepared: &PreparedTone) -> Result<Completion> {
        let tone = &prepared.tone;
        tracing::trace!(
            byte = tone.byte,
            frequency = tone.frequency,
            color = tone.color_index,
            "tone"
        );
        if self.config.spectrum {
            self.renderer.spectrum(tone, self.config.spectrum_width)?;
        }
        self.scroll.push(tone.color_index);
        self.renderer.render(&self.scroll)?;
        self.sink.submit(&prepared.waveform)
    }

    /// Wait for a tone to finish; `false` if a stop was requested first
    fn await_completion(&mut self, completion: &Completion) -> Result<bool> {
        loop {
            if self.stop.is_stopped() {
                return Ok(false);
            }
            if let Some(result) = completion.wait_timeout(STOP_POLL) {
                result?;
                return Ok(true);
            }
        }
    }

    fn transition(&mut self, state: PipelineState) {
        tracing::debug!(from = ?self.state, to = ?state, "pipeline state");
        self.state = state;
        self.transitions.push(state);
    }
}
