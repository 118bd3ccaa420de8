//! # MoodPlay core
//!
//! Shared vocabulary for the MoodPlay workspace:
//!
//! - [`Emotion`], [`DetectionSource`], [`DetectionMode`] and the immutable
//!   [`EmotionObservation`] produced by the detector
//! - [`MoodplayConfig`]: TOML configuration with env overrides
//! - [`TrackCatalog`] and [`Playback`]: the static music recommendation library
//! - [`SessionStats`]: running counters over the observation stream

pub mod catalog;
pub mod config;
pub mod emotion;
pub mod error;
pub mod playback;
pub mod stats;

pub use catalog::{format_duration, Track, TrackCatalog};
pub use config::{DetectorConfig, MoodplayConfig, RecommendationConfig};
pub use emotion::{DetectionMode, DetectionSource, Emotion, EmotionObservation};
pub use error::MoodplayError;
pub use playback::Playback;
pub use stats::SessionStats;
