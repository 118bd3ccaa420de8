//! Error taxonomy for MoodPlay domain operations.
//!
//! The simulator itself never fails; these cover parsing user input,
//! catalog lookups and configuration validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoodplayError {
    #[error("unknown emotion `{0}` (expected one of happy, sad, angry, surprised, neutral, fear, disgust, stress)")]
    UnknownEmotion(String),

    #[error("unknown detection mode `{0}` (expected facial, voice or both)")]
    UnknownMode(String),

    #[error("unknown detection source `{0}` (expected facial or voice)")]
    UnknownSource(String),

    #[error("no track with id `{0}` in the catalog")]
    UnknownTrack(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MoodplayError>;
