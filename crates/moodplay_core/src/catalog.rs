//! Static music library keyed by emotion.
//!
//! Recommendations are a lookup, not a model: each emotion maps to a
//! hand-picked list, and emotions without an entry borrow the fallback list.

use crate::config::RecommendationConfig;
use crate::emotion::Emotion;
use crate::error::MoodplayError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: u32,
    /// How well the track fits the emotion it is filed under (0.0 to 1.0)
    pub emotion_match: f32,
    pub genre: String,
    pub spotify_url: String,
    pub cover_url: String,
}

impl Track {
    #[allow(clippy::too_many_arguments)]
    fn builtin(
        id: &str,
        title: &str,
        artist: &str,
        album: &str,
        duration_secs: u32,
        emotion_match: f32,
        genre: &str,
        spotify_id: &str,
        cover_id: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration_secs,
            emotion_match,
            genre: genre.to_string(),
            spotify_url: format!("https://open.spotify.com/track/{}", spotify_id),
            cover_url: format!("https://images.unsplash.com/photo-{}?w=300", cover_id),
        }
    }
}

/// Track library with per-emotion shelves.
#[derive(Debug, Clone)]
pub struct TrackCatalog {
    shelves: BTreeMap<Emotion, Vec<Track>>,
    fallback: Emotion,
    limit: usize,
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self::builtin(&RecommendationConfig::default())
    }
}

impl TrackCatalog {
    /// An empty catalog with the given fallback and limit.
    pub fn new(config: &RecommendationConfig) -> Self {
        Self {
            shelves: BTreeMap::new(),
            fallback: config.fallback_emotion,
            limit: config.limit,
        }
    }

    /// The catalog shipped with the app.
    pub fn builtin(config: &RecommendationConfig) -> Self {
        let mut catalog = Self::new(config);
        catalog.insert(
            Emotion::Happy,
            Track::builtin(
                "1", "Good as Hell", "Lizzo", "Cuz I Love You", 219, 0.95, "Pop",
                "1WkMMavIMc4JZ8cfMmxHkI", "1493225457124-a3eb161ffa5f",
            ),
        );
        catalog.insert(
            Emotion::Happy,
            Track::builtin(
                "2", "Happy", "Pharrell Williams", "G I R L", 232, 0.92, "Pop",
                "60nZcImufyMA1MKQY3dcCH", "1514525253161-7a46d19cd819",
            ),
        );
        catalog.insert(
            Emotion::Sad,
            Track::builtin(
                "3", "Someone Like You", "Adele", "21", 285, 0.89, "Soul",
                "1zwMYTA5nlNjZxYrvBB2pV", "1487180144351-b8472da7d491",
            ),
        );
        catalog.insert(
            Emotion::Sad,
            Track::builtin(
                "4", "Mad World", "Gary Jules", "Trading Snakeoil for Wolftickets", 186, 0.94,
                "Alternative", "3JOVT2M8YK9GQkY2Cm0kDB", "1571330735066-03aaa9429d89",
            ),
        );
        catalog.insert(
            Emotion::Neutral,
            Track::builtin(
                "5", "Weightless", "Marconi Union", "Weightless", 513, 0.88, "Ambient",
                "2WfaOiMkCvy7F5fcp2zZ8L", "1470225620780-dba8ba36b745",
            ),
        );
        catalog
    }

    /// File a track under an emotion.
    pub fn insert(&mut self, emotion: Emotion, track: Track) {
        self.shelves.entry(emotion).or_default().push(track);
    }

    /// Whether the emotion has its own shelf (as opposed to using the fallback).
    pub fn has_tracks_for(&self, emotion: Emotion) -> bool {
        self.shelves.get(&emotion).is_some_and(|s| !s.is_empty())
    }

    /// Best-matching tracks for `emotion`, highest `emotion_match` first.
    ///
    /// Emotions without a shelf get the fallback emotion's tracks; if that is
    /// empty too, the result is empty.
    pub fn recommend(&self, emotion: Emotion) -> Vec<&Track> {
        let shelf = if self.has_tracks_for(emotion) {
            &self.shelves[&emotion]
        } else {
            tracing::debug!("No tracks for {}, falling back to {}", emotion, self.fallback);
            match self.shelves.get(&self.fallback) {
                Some(shelf) => shelf,
                None => return Vec::new(),
            }
        };

        let mut picks: Vec<&Track> = shelf.iter().collect();
        picks.sort_by(|a, b| b.emotion_match.total_cmp(&a.emotion_match));
        picks.truncate(self.limit);
        picks
    }

    pub fn find(&self, id: &str) -> Option<&Track> {
        self.shelves.values().flatten().find(|t| t.id == id)
    }

    /// Like [`TrackCatalog::find`], but an unknown id is an error.
    pub fn get(&self, id: &str) -> Result<&Track, MoodplayError> {
        self.find(id)
            .ok_or_else(|| MoodplayError::UnknownTrack(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.shelves.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render a duration as `m:ss`.
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
