//! Emotion Sampling Simulator
//!
//! The simulator stands in for a facial/voice emotion classifier. While
//! running it:
//! - Produces one reading per tick (see [`TickConfig`])
//! - Replaces the single "current" reading with it
//! - Hands it by value to the [`ObservationSink`] and to `subscribe()` receivers
//!
//! The user may correct the current reading at any time with
//! [`EmotionSimulator::override_emotion`]; corrections take the same path.
//!
//! Readings reach consumers in the order they replaced `current`: each one is
//! queued under the session lock, and a single caller at a time drains the
//! queue into the sink.

use crate::entropy::{EntropySource, RandomEntropy};
use crate::sampler;
use crate::sink::ObservationSink;
use crate::tick::TickConfig;
use chrono::Utc;
use moodplay_core::{DetectionMode, DetectorConfig, Emotion, EmotionObservation};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Recording state. Only `start()` and `stop()` move between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    Stopped,
    Running,
}

/// Mutable session state, guarded by one lock.
struct Session {
    state: SimulatorState,
    mode: DetectionMode,
    current: Option<EmotionObservation>,
    entropy: Box<dyn EntropySource>,
    /// Bumped on every start; a tick task only emits under its own epoch.
    epoch: u64,
    task: Option<JoinHandle<()>>,
    /// Readings set as `current` but not yet handed to consumers, oldest first.
    outbox: VecDeque<EmotionObservation>,
    /// Some caller is draining `outbox`; others only enqueue.
    delivering: bool,
}

/// Everything the tick task shares with the handle.
struct Inner {
    session: Mutex<Session>,
    sink: Box<dyn ObservationSink>,
    watch_tx: watch::Sender<Option<EmotionObservation>>,
    config: TickConfig,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw the next reading, unless this task's session has been stopped
    /// or superseded by a newer start.
    fn sample_if_current(&self, epoch: u64) -> Option<EmotionObservation> {
        let mut session = self.lock();
        if session.state != SimulatorState::Running || session.epoch != epoch {
            return None;
        }
        let mode = session.mode;
        let observation = sampler::sample(
            session.entropy.as_mut(),
            mode,
            self.config.confidence.clone(),
            Utc::now(),
        );
        self.publish(session, observation);
        Some(observation)
    }

    /// Make `observation` current and deliver it after every reading queued
    /// before it.
    ///
    /// If another caller is already delivering (another thread, or a sink
    /// re-entering the simulator), the reading is only queued and that caller
    /// delivers it. Otherwise this call drains the queue, releasing the lock
    /// around each sink call.
    fn publish<'a>(&'a self, mut session: MutexGuard<'a, Session>, observation: EmotionObservation) {
        session.current = Some(observation);
        session.outbox.push_back(observation);
        if session.delivering {
            return;
        }
        session.delivering = true;

        loop {
            let Some(next) = session.outbox.pop_front() else {
                session.delivering = false;
                return;
            };
            drop(session);
            self.deliver(next);
            session = self.lock();
        }
    }

    /// Hand one reading to subscribers and the sink. A panicking sink is
    /// logged and otherwise ignored so it cannot take the tick task or the
    /// session state down with it.
    fn deliver(&self, observation: EmotionObservation) {
        self.watch_tx.send_replace(Some(observation));

        let delivered = panic::catch_unwind(AssertUnwindSafe(|| {
            self.sink.on_emotion_detected(observation)
        }));
        if delivered.is_err() {
            tracing::warn!(
                "Observation sink panicked on {} ({}); continuing",
                observation.emotion,
                observation.source
            );
        }
    }
}

/// Tick loop for one running period. Ends when the session stops or restarts.
async fn run_ticks(inner: Arc<Inner>, epoch: u64, started: Instant) {
    let period = inner.config.interval;
    let mut interval = tokio::time::interval_at(started + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(observation) = inner.sample_if_current(epoch) else {
            tracing::trace!("Tick task for epoch {} retiring", epoch);
            break;
        };

        tracing::debug!(
            "Detected {} at {:.3} via {}",
            observation.emotion,
            observation.confidence,
            observation.source
        );
    }
}

/// Timer-driven source of synthetic [`EmotionObservation`]s.
///
/// `start()` must be called from within a Tokio runtime.
pub struct EmotionSimulator {
    inner: Arc<Inner>,
}

impl EmotionSimulator {
    /// Create a stopped simulator with an OS-seeded random source.
    pub fn new(config: TickConfig, mode: DetectionMode, sink: impl ObservationSink + 'static) -> Self {
        Self::with_entropy(config, mode, sink, RandomEntropy::from_entropy())
    }

    /// Create from the `[detector]` config section.
    pub fn from_config(config: &DetectorConfig, sink: impl ObservationSink + 'static) -> Self {
        Self::new(TickConfig::from(config), config.mode, sink)
    }

    /// Create with an explicit random source (seeded or scripted).
    pub fn with_entropy(
        config: TickConfig,
        mode: DetectionMode,
        sink: impl ObservationSink + 'static,
        entropy: impl EntropySource + 'static,
    ) -> Self {
        let (watch_tx, _) = watch::channel(None);
        let session = Session {
            state: SimulatorState::Stopped,
            mode,
            current: None,
            entropy: Box::new(entropy),
            epoch: 0,
            task: None,
            outbox: VecDeque::new(),
            delivering: false,
        };

        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                sink: Box::new(sink),
                watch_tx,
                config,
            }),
        }
    }

    /// Begin recording. No-op if already running.
    pub fn start(&self) {
        let mut session = self.inner.lock();
        if session.state == SimulatorState::Running {
            tracing::debug!("start() ignored: already running");
            return;
        }

        session.state = SimulatorState::Running;
        session.epoch += 1;
        let epoch = session.epoch;
        let started = Instant::now();
        session.task = Some(tokio::spawn(run_ticks(Arc::clone(&self.inner), epoch, started)));

        tracing::info!(
            "Emotion detection started (mode={}, every {:?})",
            session.mode,
            self.inner.config.interval
        );
    }

    /// Stop recording. No tick is emitted after this returns. No-op if stopped.
    pub fn stop(&self) {
        let task = {
            let mut session = self.inner.lock();
            if session.state == SimulatorState::Stopped {
                tracing::debug!("stop() ignored: already stopped");
                return;
            }
            session.state = SimulatorState::Stopped;
            session.task.take()
        };

        if let Some(task) = task {
            task.abort();
        }
        tracing::info!("Emotion detection stopped");
    }

    /// Change modality selection. Applies from the next tick on.
    pub fn set_mode(&self, mode: DetectionMode) {
        let mut session = self.inner.lock();
        if session.mode != mode {
            tracing::info!("Detection mode {} -> {}", session.mode, mode);
            session.mode = mode;
        }
    }

    /// Correct the current reading to `emotion`.
    ///
    /// The correction keeps the current reading's source (or the configured
    /// `override_source` if there is none), saturates confidence at 1.0, is
    /// stamped now, and is emitted like a tick. Does not change the state.
    ///
    /// Delivered before this returns unless a delivery is already under way;
    /// then it follows that delivery.
    pub fn override_emotion(&self, emotion: Emotion) -> EmotionObservation {
        let session = self.inner.lock();
        let source = session
            .current
            .map(|c| c.source)
            .unwrap_or(self.inner.config.override_source);
        let observation = EmotionObservation::corrected(emotion, source, Utc::now());

        tracing::info!("User corrected emotion to {} ({})", emotion, observation.source);
        self.inner.publish(session, observation);
        observation
    }

    /// The most recent reading, if any.
    pub fn current(&self) -> Option<EmotionObservation> {
        self.inner.lock().current
    }

    pub fn mode(&self) -> DetectionMode {
        self.inner.lock().mode
    }

    pub fn state(&self) -> SimulatorState {
        self.inner.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SimulatorState::Running
    }

    pub fn config(&self) -> &TickConfig {
        &self.inner.config
    }

    /// Watch the current reading. Starts at `None` until the first reading.
    pub fn subscribe(&self) -> watch::Receiver<Option<EmotionObservation>> {
        self.inner.watch_tx.subscribe()
    }
}

impl Drop for EmotionSimulator {
    fn drop(&mut self) {
        if let Some(task) = self.inner.lock().task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use moodplay_core::DetectionSource;

    #[test]
    fn test_new_simulator_is_stopped() {
        let sim = EmotionSimulator::new(TickConfig::default(), DetectionMode::Both, NullSink);
        assert_eq!(sim.state(), SimulatorState::Stopped);
        assert_eq!(sim.mode(), DetectionMode::Both);
        assert!(sim.current().is_none());
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let sim = EmotionSimulator::new(TickConfig::default(), DetectionMode::Both, NullSink);
        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
    }

    #[test]
    fn test_override_without_runtime_or_history() {
        let sim = EmotionSimulator::new(TickConfig::default(), DetectionMode::Voice, NullSink);
        let obs = sim.override_emotion(Emotion::Fear);
        // No prior reading: configured default, not the mode
        assert_eq!(obs.source, DetectionSource::Facial);
        assert_eq!(obs.confidence, 1.0);
        assert_eq!(sim.current(), Some(obs));
        assert!(!sim.is_running());
    }

    #[test]
    fn test_from_config_uses_section() {
        let cfg = DetectorConfig {
            mode: DetectionMode::Facial,
            interval_ms: 750,
            ..Default::default()
        };
        let sim = EmotionSimulator::from_config(&cfg, NullSink);
        assert_eq!(sim.mode(), DetectionMode::Facial);
        assert_eq!(sim.config().interval, std::time::Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_start_and_stop_transitions() {
        let sim = EmotionSimulator::new(TickConfig::default(), DetectionMode::Both, NullSink);
        sim.start();
        assert_eq!(sim.state(), SimulatorState::Running);
        sim.start();
        assert_eq!(sim.state(), SimulatorState::Running);
        sim.set_mode(DetectionMode::Voice);
        assert_eq!(sim.state(), SimulatorState::Running);
        sim.stop();
        assert_eq!(sim.state(), SimulatorState::Stopped);
    }
}
