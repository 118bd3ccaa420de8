//! Running counters over a session's observation stream.

use crate::emotion::{DetectionSource, Emotion, EmotionObservation};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub detections: u64,
    pub overrides: u64,
    pub facial: u64,
    pub voice: u64,
    /// Indexed by [`Emotion::index`].
    per_emotion: [u64; 8],
    /// Sum of confidences over sampled (non-override) readings.
    sampled_confidence_sum: f64,
    pub last: Option<EmotionObservation>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, observation: &EmotionObservation) {
        self.detections += 1;
        self.per_emotion[observation.emotion.index()] += 1;
        match observation.source {
            DetectionSource::Facial => self.facial += 1,
            DetectionSource::Voice => self.voice += 1,
        }
        if observation.is_override() {
            self.overrides += 1;
        } else {
            self.sampled_confidence_sum += observation.confidence;
        }
        self.last = Some(*observation);
    }

    pub fn count(&self, emotion: Emotion) -> u64 {
        self.per_emotion[emotion.index()]
    }

    /// Most frequent label so far; ties go to the earlier label in [`Emotion::ALL`].
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        if self.detections == 0 {
            return None;
        }
        let mut best = Emotion::ALL[0];
        for e in Emotion::ALL {
            if self.count(e) > self.count(best) {
                best = e;
            }
        }
        Some(best)
    }

    /// Mean confidence of sampled readings; corrections are excluded.
    pub fn mean_confidence(&self) -> Option<f64> {
        let sampled = self.detections - self.overrides;
        (sampled > 0).then(|| self.sampled_confidence_sum / sampled as f64)
    }
}
