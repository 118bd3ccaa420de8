//! Property-based tests for moodplay_core stats, catalog and playback.
//!
//! Verifies that session counters stay mutually consistent for any
//! observation stream and that catalog/playback operations never break
//! their invariants.

use chrono::{TimeZone, Utc};
use moodplay_core::{
    DetectionSource, Emotion, EmotionObservation, Playback, RecommendationConfig, SessionStats,
    TrackCatalog,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_emotion() -> impl Strategy<Value = Emotion> {
    (0usize..Emotion::ALL.len()).prop_map(|i| Emotion::ALL[i])
}

fn arb_source() -> impl Strategy<Value = DetectionSource> {
    prop_oneof![Just(DetectionSource::Facial), Just(DetectionSource::Voice)]
}

fn arb_observation() -> impl Strategy<Value = EmotionObservation> {
    (
        arb_emotion(),
        prop_oneof![0.65f64..0.95, Just(1.0)],
        arb_source(),
        0i64..1_000_000,
    )
        .prop_map(|(emotion, confidence, source, secs)| {
            let ts = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
            EmotionObservation::new(emotion, confidence, ts, source)
        })
}

// ============================================================================
// SessionStats
// ============================================================================

proptest! {
    #[test]
    fn stats_counters_are_consistent(stream in prop::collection::vec(arb_observation(), 0..200)) {
        let mut stats = SessionStats::new();
        for obs in &stream {
            stats.record(obs);
        }

        prop_assert_eq!(stats.detections, stream.len() as u64);
        prop_assert_eq!(stats.facial + stats.voice, stats.detections);
        let per_label: u64 = Emotion::ALL.iter().map(|e| stats.count(*e)).sum();
        prop_assert_eq!(per_label, stats.detections);
        prop_assert_eq!(
            stats.overrides,
            stream.iter().filter(|o| o.is_override()).count() as u64
        );
        prop_assert_eq!(stats.last, stream.last().copied());

        if let Some(mean) = stats.mean_confidence() {
            prop_assert!(mean >= 0.65 - 1e-9 && mean <= 0.95 + 1e-9, "mean {} outside sampled range", mean);
        }
        if let Some(dominant) = stats.dominant_emotion() {
            let top = stats.count(dominant);
            prop_assert!(Emotion::ALL.iter().all(|e| stats.count(*e) <= top));
        }
    }
}

// ============================================================================
// Catalog & playback
// ============================================================================

proptest! {
    #[test]
    fn recommendations_never_exceed_limit(emotion in arb_emotion(), limit in 1usize..4) {
        let config = RecommendationConfig { fallback_emotion: Emotion::Neutral, limit };
        let catalog = TrackCatalog::builtin(&config);
        let picks = catalog.recommend(emotion);

        prop_assert!(!picks.is_empty());
        prop_assert!(picks.len() <= limit);
        for pair in picks.windows(2) {
            prop_assert!(pair[0].emotion_match >= pair[1].emotion_match);
        }
    }

    #[test]
    fn double_toggle_restores_like_state(ids in prop::collection::vec(prop::sample::select(vec!["1", "2", "3", "4", "5"]), 0..20)) {
        let catalog = TrackCatalog::default();
        let mut playback = Playback::new();
        for id in &ids {
            playback.toggle_like(&catalog, id).unwrap();
        }
        let before: Vec<String> = playback.liked().map(String::from).collect();
        for id in &ids {
            playback.toggle_like(&catalog, id).unwrap();
            playback.toggle_like(&catalog, id).unwrap();
        }
        let after: Vec<String> = playback.liked().map(String::from).collect();
        prop_assert_eq!(before, after);
    }
}
