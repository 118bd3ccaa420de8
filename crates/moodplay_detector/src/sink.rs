//! Consumer seam for the observation stream.

use moodplay_core::EmotionObservation;

/// Receives every reading the simulator produces, sampled or corrected.
///
/// Called outside any simulator lock, one reading at a time, in the order the
/// readings became current. A sink may call back into the simulator; a
/// reading it produces that way is delivered after the current call returns.
/// Keep it non-blocking: a slow sink delays every later reading.
pub trait ObservationSink: Send + Sync {
    fn on_emotion_detected(&self, observation: EmotionObservation);
}

impl<F> ObservationSink for F
where
    F: Fn(EmotionObservation) + Send + Sync,
{
    fn on_emotion_detected(&self, observation: EmotionObservation) {
        self(observation)
    }
}

/// Sink that drops everything. Useful when only `subscribe()` is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ObservationSink for NullSink {
    fn on_emotion_detected(&self, _observation: EmotionObservation) {}
}
