//! Step timer.
//!
//! A turn is a list of `(delay, effect)` pairs. The timer waits each delay
//! on a [`Clock`] and then hands the effect to the caller. Production code
//! uses [`TokioClock`]; tests use [`InstantClock`] or [`RecordingClock`] to
//! run a turn without wall-clock waits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

/// Source of simulated latency
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real delays on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Clock that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantClock;

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, _duration: Duration) {}
}

/// Clock that records every requested delay and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingClock {
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().clone()
    }

    /// Sum of all requested delays
    pub fn elapsed(&self) -> Duration {
        self.requested.lock().iter().sum()
    }
}

#[async_trait]
impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().push(duration);
    }
}

/// An effect applied after waiting `delay`
#[derive(Debug, Clone, PartialEq)]
pub struct TimedStep<E> {
    pub delay: Duration,
    pub effect: E,
}

impl<E> TimedStep<E> {
    pub fn new(delay: Duration, effect: E) -> Self {
        Self { delay, effect }
    }

    /// Step applied without waiting
    pub fn immediate(effect: E) -> Self {
        Self::new(Duration::ZERO, effect)
    }
}

/// Drives a step sequence against a clock
#[derive(Clone)]
pub struct StepTimer {
    clock: Arc<dyn Clock>,
}

impl StepTimer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Timer on real tokio delays
    pub fn realtime() -> Self {
        Self::new(Arc::new(TokioClock))
    }

    /// Timer that skips every delay
    pub fn instant() -> Self {
        Self::new(Arc::new(InstantClock))
    }

    /// Wait one step's delay
    pub async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            self.clock.sleep(delay).await;
        }
    }

    /// Run every step in order, applying each effect after its delay.
    ///
    /// Returns the number of steps applied.
    pub async fn run<E, F>(&self, steps: Vec<TimedStep<E>>, mut apply: F) -> usize
    where
        E: Send,
        F: FnMut(E) + Send,
    {
        let mut applied = 0;
        for step in steps {
            self.wait(step.delay).await;
            apply(step.effect);
            applied += 1;
        }
        applied
    }
}

impl std::fmt::Debug for StepTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepTimer").finish_non_exhaustive()
    }
}
