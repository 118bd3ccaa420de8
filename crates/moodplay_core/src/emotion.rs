//! Emotion labels, sensing modalities and the observation value type.
//!
//! The label set is closed: every observation, sampled or corrected, carries
//! one of the eight [`Emotion`] variants.

use crate::error::MoodplayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete emotion labels reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
    Fear,
    Disgust,
    Stress,
}

impl Emotion {
    /// All labels in canonical order. Uniform sampling indexes into this.
    pub const ALL: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Neutral,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Stress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Neutral => "neutral",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Stress => "stress",
        }
    }

    /// Glyph shown next to the label.
    pub fn icon(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Angry => "😠",
            Emotion::Surprised => "😲",
            Emotion::Neutral => "😐",
            Emotion::Fear => "😨",
            Emotion::Disgust => "🤢",
            Emotion::Stress => "😰",
        }
    }

    /// Position in [`Emotion::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = MoodplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| MoodplayError::UnknownEmotion(s.to_string()))
    }
}

/// The sensing channel an observation is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    #[default]
    Facial,
    Voice,
}

impl DetectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::Facial => "facial",
            DetectionSource::Voice => "voice",
        }
    }
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionSource {
    type Err = MoodplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facial" => Ok(DetectionSource::Facial),
            "voice" => Ok(DetectionSource::Voice),
            _ => Err(MoodplayError::UnknownSource(s.to_string())),
        }
    }
}

/// Which modalities the user enabled for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    Facial,
    Voice,
    #[default]
    Both,
}

impl DetectionMode {
    /// The source every observation takes in a single-modality mode.
    /// `None` for [`DetectionMode::Both`], where the source is chosen per tick.
    pub fn fixed_source(&self) -> Option<DetectionSource> {
        match self {
            DetectionMode::Facial => Some(DetectionSource::Facial),
            DetectionMode::Voice => Some(DetectionSource::Voice),
            DetectionMode::Both => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::Facial => "facial",
            DetectionMode::Voice => "voice",
            DetectionMode::Both => "both",
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMode {
    type Err = MoodplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facial" => Ok(DetectionMode::Facial),
            "voice" => Ok(DetectionMode::Voice),
            "both" => Ok(DetectionMode::Both),
            _ => Err(MoodplayError::UnknownMode(s.to_string())),
        }
    }
}

/// One emotion reading. Immutable: a newer reading replaces it, never edits it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionObservation {
    pub emotion: Emotion,
    /// Classifier confidence. Sampled readings stay below 1.0; a user
    /// correction saturates it at exactly 1.0.
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub source: DetectionSource,
}

impl EmotionObservation {
    /// Confidence assigned to user corrections.
    pub const OVERRIDE_CONFIDENCE: f64 = 1.0;

    pub fn new(
        emotion: Emotion,
        confidence: f64,
        timestamp: DateTime<Utc>,
        source: DetectionSource,
    ) -> Self {
        Self {
            emotion,
            confidence,
            timestamp,
            source,
        }
    }

    /// A user correction: ground truth for `emotion`, attributed to `source`.
    pub fn corrected(emotion: Emotion, source: DetectionSource, timestamp: DateTime<Utc>) -> Self {
        Self::new(emotion, Self::OVERRIDE_CONFIDENCE, timestamp, source)
    }

    /// True if this reading came from a user correction rather than the sampler.
    pub fn is_override(&self) -> bool {
        self.confidence >= Self::OVERRIDE_CONFIDENCE
    }

    /// Confidence as a percentage, as shown to the user (`"87.3%"`).
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

impl fmt::Display for EmotionObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {} detection)",
            self.emotion.icon(),
            self.emotion,
            self.confidence_label(),
            self.source
        )
    }
}
