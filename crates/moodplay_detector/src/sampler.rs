//! One simulated classifier reading.

use crate::entropy::EntropySource;
use chrono::{DateTime, Utc};
use moodplay_core::{DetectionMode, DetectionSource, Emotion, EmotionObservation};
use std::ops::Range;

/// Draw a reading: label uniform over [`Emotion::ALL`], confidence uniform in
/// `confidence`, source fixed by `mode` or a coin flip for `Both`.
///
/// The coin is only consumed in `Both` mode.
pub fn sample(
    entropy: &mut dyn EntropySource,
    mode: DetectionMode,
    confidence: Range<f64>,
    at: DateTime<Utc>,
) -> EmotionObservation {
    let emotion = Emotion::ALL[entropy.pick(Emotion::ALL.len())];
    let confidence = entropy.uniform(confidence);
    let source = mode.fixed_source().unwrap_or_else(|| {
        if entropy.coin() {
            DetectionSource::Facial
        } else {
            DetectionSource::Voice
        }
    });
    EmotionObservation::new(emotion, confidence, at, source)
}
