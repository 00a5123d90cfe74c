//! Completion signal for one submitted tone
//!
//! A sink hands back a [`Completion`] for every waveform it accepts and keeps the
//! matching [`CompletionNotifier`]. The pipeline suspends on the completion until
//! the sink reports that the tone has finished playing.

use crate::{Result, SpectoneError};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Shared {
    outcome: Mutex<Option<std::result::Result<(), String>>>,
    ready: Condvar,
}

/// Waitable handle for one tone's playback
#[derive(Debug, Clone)]
pub struct Completion {
    shared: Arc<Shared>,
}

/// Sink-side half used to signal the waiting pipeline
#[derive(Debug, Clone)]
pub struct CompletionNotifier {
    shared: Arc<Shared>,
}

impl Completion {
    /// Create a pending completion and its notifier
    pub fn pair() -> (Completion, CompletionNotifier) {
        let shared = Arc::new(Shared::default());
        (
            Completion {
                shared: Arc::clone(&shared),
            },
            CompletionNotifier { shared },
        )
    }

    /// A completion that is already done (for sinks that finish synchronously)
    pub fn ready() -> Self {
        let (completion, notifier) = Self::pair();
        notifier.complete();
        completion
    }

    /// Whether the sink has reported back
    pub fn is_complete(&self) -> bool {
        self.shared.outcome.lock().is_some()
    }

    /// Block until the tone has finished
    pub fn wait(&self) -> Result<()> {
        let mut outcome = self.shared.outcome.lock();
        while outcome.is_none() {
            self.shared.ready.wait(&mut outcome);
        }
        into_result(outcome.as_ref())
    }

    /// Block for at most `timeout`; `None` if the tone is still playing
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<()>> {
        let mut outcome = self.shared.outcome.lock();
        if outcome.is_none() {
            self.shared.ready.wait_for(&mut outcome, timeout);
        }
        outcome.as_ref().map(|o| into_result(Some(o)))
    }
}

impl CompletionNotifier {
    /// Report that the tone finished playing. Later calls are ignored.
    pub fn complete(&self) {
        self.settle(Ok(()));
    }

    /// Report that playback failed. Ignored if already settled.
    pub fn fail(&self, reason: impl Into<String>) {
        self.settle(Err(reason.into()));
    }

    fn settle(&self, result: std::result::Result<(), String>) {
        let mut outcome = self.shared.outcome.lock();
        if outcome.is_none() {
            *outcome = Some(result);
            self.shared.ready.notify_all();
        }
    }
}

fn into_result(outcome: Option<&std::result::Result<(), String>>) -> Result<()> {
    match outcome {
        Some(Ok(())) => Ok(()),
        Some(Err(reason)) => Err(SpectoneError::AudioDevice(reason.clone())),
        None => Err(SpectoneError::Other("completion not settled".into())),
    }
}
