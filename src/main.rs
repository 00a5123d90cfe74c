//! spectone CLI
//!
//! Plays a file byte by byte:
//! - prints the estimated duration, pauses briefly, then starts
//! - one square-wave tone and one scrolling colored row per byte
//! - Ctrl-C stops after restoring the terminal

mod args;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use spectone::playback::{ClockSink, PlaybackSink};
use spectone::{
    estimate_duration, format_duration, ByteSource, EstimateStrategy, Orchestrator, PlayerConfig,
    SpectoneError, StopSignal, TerminalGeometry,
};
use std::io;
use std::path::Path;
use std::process::ExitCode;

use args::Args;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let Some(path) = args.file.clone() else {
        Args::command().print_help().ok();
        println!();
        return ExitCode::SUCCESS;
    };

    match run(&args, &path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<SpectoneError>() {
                Some(e) if matches!(e, SpectoneError::FileNotFound(_)) => eprintln!("{e}"),
                _ => eprintln!("An error occurred: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, path: &Path) -> anyhow::Result<()> {
    let base = match &args.config {
        Some(config_path) => PlayerConfig::from_json_file(config_path)?,
        None => PlayerConfig::default(),
    };
    let config = args.apply(base);
    config.validate()?;

    // A missing file is reported here, before anything plays.
    let estimate = estimate_duration(
        ByteSource::open(path, config.chunk_size)?,
        config.tone_duration(),
        config.estimate,
    )?;
    println!(
        "Estimated audio duration: {}",
        format_duration(estimate.seconds)
    );
    std::thread::sleep(config.startup_pause());

    let source = ByteSource::open(path, config.chunk_size)?;
    let sink = open_sink(args, &config)?;

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.stop()).context("failed to install Ctrl-C handler")?;

    let estimate_rule = config.estimate;
    let mut orchestrator =
        Orchestrator::new(config, TerminalGeometry::query(), io::stdout(), sink)?
            .with_stop_signal(stop);
    let report = orchestrator
        .run(source)
        .with_context(|| format!("playback of {} failed", path.display()))?;

    println!();
    if report.interrupted {
        println!("Playback interrupted.");
    }
    println!("Tones played:      {} ({})", report.tones_played, report.sink);
    println!(
        "Playback time:     {}",
        format_duration(report.nominal_seconds())
    );
    if estimate_rule == EstimateStrategy::RepeatDoubling && estimate.repeats > 0 {
        println!(
            "Estimate counted {} repeated bytes twice; playback plays each byte once.",
            estimate.repeats
        );
    }
    Ok(())
}

fn open_sink(args: &Args, config: &PlayerConfig) -> anyhow::Result<Box<dyn PlaybackSink>> {
    if let Some(wav_path) = &args.wav {
        return wav_sink(wav_path, config.sample_rate);
    }
    if args.mute {
        return Ok(Box::new(ClockSink::new()));
    }
    device_sink()
}

#[cfg(feature = "export-wav")]
fn wav_sink(path: &Path, sample_rate: u32) -> anyhow::Result<Box<dyn PlaybackSink>> {
    let sink = spectone::WavSink::create(path, sample_rate)?;
    println!("Rendering to {}", sink.path().display());
    Ok(Box::new(sink))
}

#[cfg(not(feature = "export-wav"))]
fn wav_sink(_path: &Path, _sample_rate: u32) -> anyhow::Result<Box<dyn PlaybackSink>> {
    anyhow::bail!("WAV export requires the \"export-wav\" feature")
}

#[cfg(feature = "streaming")]
fn device_sink() -> anyhow::Result<Box<dyn PlaybackSink>> {
    let device = spectone::DeviceSink::new().context("use --mute to play without sound")?;
    Ok(Box::new(device))
}

#[cfg(not(feature = "streaming"))]
fn device_sink() -> anyhow::Result<Box<dyn PlaybackSink>> {
    anyhow::bail!(
        "audio output requires the \"streaming\" feature; use --mute to play without sound"
    )
}
