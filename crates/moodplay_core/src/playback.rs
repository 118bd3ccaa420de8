//! Now-playing and liked-track state for a listening session.

use crate::catalog::TrackCatalog;
use crate::error::MoodplayError;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct Playback {
    now_playing: Option<String>,
    liked: BTreeSet<String>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `id`, or pause it if it is already playing. Starting a track
    /// replaces whatever was playing. Returns the now-playing id.
    pub fn toggle_play(&mut self, catalog: &TrackCatalog, id: &str) -> Result<Option<&str>, MoodplayError> {
        catalog.get(id)?;
        if self.now_playing.as_deref() == Some(id) {
            self.now_playing = None;
        } else {
            self.now_playing = Some(id.to_string());
        }
        Ok(self.now_playing.as_deref())
    }

    /// Like or unlike `id`. Returns whether the track is liked afterwards.
    pub fn toggle_like(&mut self, catalog: &TrackCatalog, id: &str) -> Result<bool, MoodplayError> {
        catalog.get(id)?;
        if !self.liked.remove(id) {
            self.liked.insert(id.to_string());
            return Ok(true);
        }
        Ok(false)
    }

    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    pub fn liked(&self) -> impl Iterator<Item = &str> {
        self.liked.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_play_switches_and_pauses() {
        let catalog = TrackCatalog::default();
        let mut playback = Playback::new();

        assert_eq!(playback.toggle_play(&catalog, "1").unwrap(), Some("1"));
        assert_eq!(playback.toggle_play(&catalog, "3").unwrap(), Some("3"));
        assert_eq!(playback.toggle_play(&catalog, "3").unwrap(), None);
        assert_eq!(playback.now_playing(), None);
    }

    #[test]
    fn test_toggle_like() {
        let catalog = TrackCatalog::default();
        let mut playback = Playback::new();

        assert!(playback.toggle_like(&catalog, "2").unwrap());
        assert!(playback.is_liked("2"));
        assert!(playback.toggle_like(&catalog, "5").unwrap());
        assert_eq!(playback.liked().collect::<Vec<_>>(), vec!["2", "5"]);

        assert!(!playback.toggle_like(&catalog, "2").unwrap());
        assert!(!playback.is_liked("2"));
    }

    #[test]
    fn test_unknown_track_leaves_state_untouched() {
        let catalog = TrackCatalog::default();
        let mut playback = Playback::new();
        playback.toggle_play(&catalog, "1").unwrap();

        assert!(matches!(
            playback.toggle_play(&catalog, "nope"),
            Err(MoodplayError::UnknownTrack(_))
        ));
        assert!(playback.toggle_like(&catalog, "nope").is_err());
        assert_eq!(playback.now_playing(), Some("1"));
        assert_eq!(playback.liked().count(), 0);
    }
}
