//! Terminal consumer of the observation stream: keeps session statistics,
//! tracks playback, and surfaces recommendations when the mood changes.

use anyhow::Result;
use chrono::Local;
use moodplay_core::{
    format_duration, Emotion, EmotionObservation, Playback, SessionStats, Track, TrackCatalog,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct Dashboard {
    catalog: TrackCatalog,
    stats: Mutex<SessionStats>,
    playback: Mutex<Playback>,
    json: bool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Dashboard {
    pub fn new(catalog: TrackCatalog, json: bool) -> Self {
        Self {
            catalog,
            stats: Mutex::new(SessionStats::new()),
            playback: Mutex::new(Playback::new()),
            json,
        }
    }

    /// Record a reading and return the lines to show for it. Recommendations
    /// are included whenever the emotion differs from the previous reading.
    pub fn observe(&self, observation: EmotionObservation) -> Vec<String> {
        let previous = {
            let mut stats = lock(&self.stats);
            let previous = stats.last.map(|o| o.emotion);
            stats.record(&observation);
            previous
        };

        let mut lines = vec![self.render_observation(&observation)];
        if previous != Some(observation.emotion) {
            lines.extend(self.recommendations(observation.emotion));
        }
        lines
    }

    pub fn render_observation(&self, observation: &EmotionObservation) -> String {
        if self.json {
            return serde_json::to_string(observation)
                .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
        }
        let marker = if observation.is_override() { " [corrected]" } else { "" };
        format!(
            "[{}] {}{}",
            observation.timestamp.with_timezone(&Local).format("%H:%M:%S"),
            observation,
            marker
        )
    }

    /// Recommendation lines for `emotion`.
    pub fn recommendations(&self, emotion: Emotion) -> Vec<String> {
        let picks = self.catalog.recommend(emotion);
        if picks.is_empty() {
            return vec![format!("No recommendations available for {} yet.", emotion)];
        }
        let mut lines = vec![format!("Recommended for {} {}:", emotion.icon(), emotion)];
        lines.extend(picks.into_iter().map(|t| self.render_track(t)));
        lines
    }

    /// Recommendations for the latest reading, if there is one.
    pub fn current_recommendations(&self) -> Vec<String> {
        let last = lock(&self.stats).last;
        match last {
            Some(obs) => self.recommendations(obs.emotion),
            None => vec!["No emotion detected yet. Start detection first.".to_string()],
        }
    }

    fn render_track(&self, track: &Track) -> String {
        let playback = lock(&self.playback);
        let playing = if playback.now_playing() == Some(track.id.as_str()) { "▶" } else { " " };
        let liked = if playback.is_liked(&track.id) { "♥" } else { " " };
        format!(
            "  {}{} #{} {} - {} ({}, {}) {:.0}% match  {}",
            playing,
            liked,
            track.id,
            track.title,
            track.artist,
            track.genre,
            format_duration(track.duration_secs),
            track.emotion_match * 100.0,
            track.spotify_url
        )
    }

    pub fn toggle_play(&self, id: &str) -> Result<String> {
        let mut playback = lock(&self.playback);
        let line = match playback.toggle_play(&self.catalog, id)? {
            Some(_) => {
                let track = self.catalog.get(id)?;
                format!("Now playing: {} - {}", track.title, track.artist)
            }
            None => "Playback paused".to_string(),
        };
        Ok(line)
    }

    pub fn toggle_like(&self, id: &str) -> Result<String> {
        let liked = lock(&self.playback).toggle_like(&self.catalog, id)?;
        let track = self.catalog.get(id)?;
        Ok(if liked {
            format!("Liked {}", track.title)
        } else {
            format!("Removed {} from likes", track.title)
        })
    }

    pub fn stats(&self) -> SessionStats {
        lock(&self.stats).clone()
    }

    pub fn stats_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stats())?)
    }

    /// One-paragraph session summary.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        let dominant = stats
            .dominant_emotion()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "none".to_string());
        let mean = stats
            .mean_confidence()
            .map(|c| format!("{:.1}%", c * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Session: {} detections ({} corrected; {} facial, {} voice), dominant emotion {}, mean confidence {}",
            stats.detections, stats.overrides, stats.facial, stats.voice, dominant, mean
        )
    }
}
