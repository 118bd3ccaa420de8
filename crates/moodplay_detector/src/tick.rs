//! Tick configuration for the sampling simulator
//!
//! Controls how often a reading is produced while recording and what
//! confidence band the simulated classifier reports in.

use moodplay_core::{DetectionSource, DetectorConfig};
use std::ops::Range;
use std::time::Duration;

/// Configuration for the sampling tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickConfig {
    /// Time between readings (default: 2000ms). The first reading arrives one
    /// full interval after `start()`.
    pub interval: Duration,
    /// Half-open band sampled confidences fall in (default: `0.65..0.95`)
    pub confidence: Range<f64>,
    /// Source used by a correction when nothing has been observed yet
    pub override_source: DetectionSource,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::from(&DetectorConfig::default())
    }
}

impl From<&DetectorConfig> for TickConfig {
    fn from(config: &DetectorConfig) -> Self {
        Self {
            interval: config.interval(),
            confidence: config.confidence_min..config.confidence_max,
            override_source: config.override_source,
        }
    }
}

impl TickConfig {
    /// Same confidence band, different cadence
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Fast cadence for demos
    pub fn fast() -> Self {
        Self::with_interval(Duration::from_millis(250))
    }
}
