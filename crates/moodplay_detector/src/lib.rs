//! # MoodPlay Detector
//!
//! A simulated emotion classifier. Instead of reading a camera or a
//! microphone, [`EmotionSimulator`] draws a synthetic reading on a fixed
//! cadence while recording is on, the way a real facial/voice model would
//! stream its output.
//!
//! ## Pieces
//!
//! - [`TickConfig`]: cadence and confidence band
//! - [`EntropySource`]: every random choice, injectable for tests
//! - [`sampler::sample`]: one reading, pure given its entropy
//! - [`ObservationSink`]: the consumer callback
//!
//! ## Lifecycle
//!
//! Stopped → `start()` → Running → `stop()` → Stopped, indefinitely.
//! Repeated starts or stops are no-ops. `set_mode()` and `override_emotion()`
//! never change the state.

mod entropy;
pub mod sampler;
mod simulator;
mod sink;
mod tick;

pub use entropy::{EntropySource, RandomEntropy};
pub use simulator::{EmotionSimulator, SimulatorState};
pub use sink::{NullSink, ObservationSink};
pub use tick::TickConfig;
