use crate::emotion::{DetectionMode, DetectionSource, Emotion};
use crate::error::MoodplayError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoodplayConfig {
    pub detector: DetectorConfig,
    pub recommendations: RecommendationConfig,
}

impl MoodplayConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied and the result is validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: MoodplayConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults
    /// with env overrides. Overrides that would make the defaults invalid are dropped.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                if let Err(e) = cfg.validate() {
                    tracing::warn!("Ignoring env overrides: {}", e);
                    cfg = Self::default();
                }
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `MOODPLAY_*` overrides read through `lookup`. Unparseable values are
    /// ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MOODPLAY_INTERVAL_MS") {
            match v.parse() {
                Ok(n) => self.detector.interval_ms = n,
                Err(_) => tracing::warn!("MOODPLAY_INTERVAL_MS is not a number: {}", v),
            }
        }
        if let Some(v) = lookup("MOODPLAY_MODE") {
            match v.parse() {
                Ok(mode) => self.detector.mode = mode,
                Err(e) => tracing::warn!("MOODPLAY_MODE ignored: {}", e),
            }
        }
        if let Some(v) = lookup("MOODPLAY_CONFIDENCE_MIN") {
            if let Ok(n) = v.parse() {
                self.detector.confidence_min = n;
            }
        }
        if let Some(v) = lookup("MOODPLAY_CONFIDENCE_MAX") {
            if let Ok(n) = v.parse() {
                self.detector.confidence_max = n;
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MoodplayError> {
        self.detector.validate()?;
        self.recommendations.validate()
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Milliseconds between simulated readings.
    pub interval_ms: u64,
    /// Lower bound (inclusive) of sampled confidence.
    pub confidence_min: f64,
    /// Upper bound (exclusive) of sampled confidence.
    pub confidence_max: f64,
    /// Modality selection at session start.
    pub mode: DetectionMode,
    /// Source attributed to a correction made before any reading exists.
    pub override_source: DetectionSource,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            confidence_min: 0.65,
            confidence_max: 0.95,
            mode: DetectionMode::Both,
            override_source: DetectionSource::Facial,
        }
    }
}

impl DetectorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> std::result::Result<(), MoodplayError> {
        if self.interval_ms == 0 {
            return Err(MoodplayError::InvalidConfig(
                "detector.interval_ms must be greater than zero".into(),
            ));
        }
        let (lo, hi) = (self.confidence_min, self.confidence_max);
        if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || hi > 1.0 || lo >= hi {
            return Err(MoodplayError::InvalidConfig(format!(
                "detector confidence range [{}, {}) must satisfy 0 <= min < max <= 1",
                lo, hi
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Emotion whose tracks are served when the detected one has none.
    pub fallback_emotion: Emotion,
    /// Maximum number of tracks per recommendation.
    pub limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            fallback_emotion: Emotion::Neutral,
            limit: 5,
        }
    }
}

impl RecommendationConfig {
    pub fn validate(&self) -> std::result::Result<(), MoodplayError> {
        if self.limit == 0 {
            return Err(MoodplayError::InvalidConfig(
                "recommendations.limit must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
