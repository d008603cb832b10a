#[cfg(test)]
mod tests {
    use crate::mood::{
        params::{genres_for_mood, params_for_mood},
        sentiment,
        timeofday::{moods_for_hour, DayPart},
        weather::{moods_for_observation, parse_response, WeatherObservation},
        MoodEngine, SignalError, MAX_MOODS,
    };
    use crate::store::{MemoryStore, SavedPlaylist, SessionStore};
    use strum::IntoEnumIterator;

    // ── Sentiment analyzer ───────────────────────────────────────────────────

    #[test]
    fn test_sentiment_strongly_positive() {
        let labels = sentiment::moods_for_text("I love this, best day ever!").unwrap();
        assert_eq!(labels, ["Excited", "Happy", "Energetic"]);
    }

    #[test]
    fn test_sentiment_mildly_positive() {
        // "like" carries a weight below the excited threshold
        let labels = sentiment::moods_for_text("I like it").unwrap();
        assert_eq!(labels, ["Positive", "Upbeat", "Cheerful"]);
    }

    #[test]
    fn test_sentiment_neutral_text_is_mellow() {
        // No lexicon hits: polarity 0.0 falls in the (-0.5, 0] bucket
        let labels = sentiment::moods_for_text("the sky was grey over the harbour").unwrap();
        assert_eq!(labels, ["Mellow", "Calm", "Relaxed"]);
    }

    #[test]
    fn test_sentiment_mildly_negative() {
        let labels = sentiment::moods_for_text("feeling a bit tired today").unwrap();
        assert_eq!(labels, ["Mellow", "Calm", "Relaxed"]);
    }

    #[test]
    fn test_sentiment_strongly_negative() {
        let labels = sentiment::moods_for_text("this is the worst, truly terrible").unwrap();
        assert_eq!(labels, ["Melancholic", "Sad", "Emotional"]);
    }

    #[test]
    fn test_sentiment_negation_flips_polarity() {
        let positive = sentiment::polarity("that was good").unwrap();
        let negated = sentiment::polarity("that was not good").unwrap();
        assert!(positive > 0.5);
        assert!(negated < -0.5);
    }

    #[test]
    fn test_sentiment_no_words_is_unanalyzable() {
        assert!(matches!(
            sentiment::moods_for_text("12345 !!! ???"),
            Err(SignalError::Unanalyzable)
        ));
    }

    #[test]
    fn test_sentiment_only_known_label_sets() {
        let known: [&[&str; 3]; 4] = [
            &["Excited", "Happy", "Energetic"],
            &["Positive", "Upbeat", "Cheerful"],
            &["Mellow", "Calm", "Relaxed"],
            &["Melancholic", "Sad", "Emotional"],
        ];
        let samples = [
            "absolutely wonderful amazing perfect",
            "pretty fun overall",
            "nothing much happening",
            "sad and lonely and miserable",
            "not nice at all",
        ];
        for text in samples {
            let labels = sentiment::moods_for_text(text).unwrap();
            assert!(known.contains(&&labels), "unexpected labels {labels:?} for {text:?}");
        }
    }

    // ── Time of day ──────────────────────────────────────────────────────────

    #[test]
    fn test_day_parts_partition_all_hours() {
        for hour in 0..24 {
            let part = DayPart::from_hour(hour);
            assert!(
                DayPart::iter().any(|p| p == part),
                "hour {hour} mapped to no variant"
            );
        }
    }

    #[test]
    fn test_day_part_boundaries_open_their_interval() {
        assert_eq!(DayPart::from_hour(5), DayPart::Morning);
        assert_eq!(DayPart::from_hour(9), DayPart::Forenoon);
        assert_eq!(DayPart::from_hour(12), DayPart::Midday);
        assert_eq!(DayPart::from_hour(15), DayPart::Afternoon);
        assert_eq!(DayPart::from_hour(18), DayPart::Evening);
        assert_eq!(DayPart::from_hour(22), DayPart::Night);
    }

    #[test]
    fn test_night_wraps_midnight() {
        for hour in [22, 23, 0, 1, 4] {
            assert_eq!(DayPart::from_hour(hour), DayPart::Night, "hour {hour}");
        }
        assert_eq!(moods_for_hour(23), ["Night", "Calm", "Peaceful"]);
    }

    #[test]
    fn test_morning_hours() {
        assert_eq!(moods_for_hour(7), ["Morning", "Energetic", "Upbeat"]);
        assert_eq!(moods_for_hour(10), ["Focused", "Productive", "Motivated"]);
    }

    // ── Weather derivation ───────────────────────────────────────────────────

    #[test]
    fn test_weather_rain_at_mild_temperature() {
        let obs = WeatherObservation {
            condition: "Rain".into(),
            temperature_c: 15.0,
        };
        assert_eq!(
            moods_for_observation(&obs),
            &["Melancholic", "Relaxed", "Contemplative"]
        );
    }

    #[test]
    fn test_weather_heat_overrides_condition() {
        let obs = WeatherObservation {
            condition: "Rain".into(),
            temperature_c: 30.0,
        };
        assert_eq!(moods_for_observation(&obs), &["Summer", "Energetic", "Party"]);
    }

    #[test]
    fn test_weather_cold_overrides_condition() {
        let obs = WeatherObservation {
            condition: "Clear".into(),
            temperature_c: 5.0,
        };
        assert_eq!(
            moods_for_observation(&obs),
            &["Cozy", "Calm", "Introspective"]
        );
    }

    #[test]
    fn test_weather_boundary_temperatures_use_condition() {
        // 25.0 is not "> 25", 10.0 is not "< 10"
        for temp in [25.0, 10.0] {
            let obs = WeatherObservation {
                condition: "Clouds".into(),
                temperature_c: temp,
            };
            assert_eq!(moods_for_observation(&obs), &["Calm", "Focused", "Mellow"]);
        }
    }

    #[test]
    fn test_weather_unknown_condition_is_neutral() {
        let obs = WeatherObservation {
            condition: "Sandstorm".into(),
            temperature_c: 18.0,
        };
        assert_eq!(moods_for_observation(&obs), &["Neutral"]);
    }

    #[test]
    fn test_weather_response_parses() {
        let body = r#"{
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "main": {"temp": 14.2, "humidity": 81}
        }"#;
        let obs = parse_response(body).unwrap();
        assert_eq!(obs.condition, "Rain");
        assert!((obs.temperature_c - 14.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weather_response_schema_errors() {
        let empty_weather = r#"{"weather": [], "main": {"temp": 14.2}}"#;
        assert!(matches!(
            parse_response(empty_weather),
            Err(SignalError::Schema(_))
        ));

        let missing_temp = r#"{"weather": [{"main": "Rain"}], "main": {}}"#;
        assert!(matches!(
            parse_response(missing_temp),
            Err(SignalError::Schema(_))
        ));
    }

    // ── Mood engine ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_engine_time_signal_is_unconditional() {
        let engine = MoodEngine::new(None);
        let moods = engine.infer_moods_at(None, None, 13).await;
        assert_eq!(moods, ["Relaxed", "Calm", "Peaceful"]);
    }

    #[tokio::test]
    async fn test_engine_text_and_time_scenario() {
        let engine = MoodEngine::new(None);
        let moods = engine
            .infer_moods_at(Some("I love this, best day ever!"), None, 10)
            .await;
        // Text labels lead, time labels fill up to the cap
        assert_eq!(
            moods,
            ["Excited", "Happy", "Energetic", "Focused", "Productive"]
        );
    }

    #[tokio::test]
    async fn test_engine_caps_and_dedups() {
        let engine = MoodEngine::new(None);
        // Afternoon overlaps the excited text labels on Energetic and Happy
        let moods = engine
            .infer_moods_at(Some("best day ever, I love it"), None, 16)
            .await;
        assert!(moods.len() <= MAX_MOODS);
        let mut unique = moods.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), moods.len(), "duplicate labels in {moods:?}");
        assert_eq!(moods[..3], ["Excited", "Happy", "Energetic"]);
    }

    #[tokio::test]
    async fn test_engine_unanalyzable_text_contributes_neutral() {
        let engine = MoodEngine::new(None);
        let moods = engine.infer_moods_at(Some("!!!"), None, 13).await;
        assert_eq!(moods, ["Neutral", "Relaxed", "Calm", "Peaceful"]);
    }

    #[tokio::test]
    async fn test_engine_city_without_weather_client_is_skipped() {
        let engine = MoodEngine::new(None);
        let with_city = engine.infer_moods_at(None, Some("Oslo"), 13).await;
        let without_city = engine.infer_moods_at(None, None, 13).await;
        assert_eq!(with_city, without_city);
    }

    #[tokio::test]
    async fn test_engine_blank_text_is_no_signal() {
        let engine = MoodEngine::new(None);
        let moods = engine.infer_moods_at(Some("   "), None, 13).await;
        assert_eq!(moods, ["Relaxed", "Calm", "Peaceful"]);
    }

    // ── Mood → catalog parameters ────────────────────────────────────────────

    #[test]
    fn test_params_for_happy() {
        let params = params_for_mood("Happy");
        assert_eq!(params.seed_genres, ["pop", "dance", "disco"]);
        assert_eq!(params.target_energy, 0.8);
        assert_eq!(params.target_valence, 0.8);
    }

    #[test]
    fn test_params_for_unknown_mood_uses_defaults() {
        let params = params_for_mood("Unknown");
        assert_eq!(params.seed_genres, ["pop", "rock"]);
        assert_eq!(params.target_energy, 0.6);
        assert_eq!(params.target_valence, 0.5);
    }

    #[test]
    fn test_params_lookup_is_case_sensitive() {
        // "happy" is not "Happy": the default row applies
        let params = params_for_mood("happy");
        assert_eq!(params.seed_genres, ["pop", "rock"]);
    }

    #[test]
    fn test_seed_genres_never_exceed_cap() {
        for mood in [
            "Happy",
            "Energetic",
            "Peaceful",
            "Melancholic",
            "Relaxed",
            "Focused",
            "Mellow",
            "Romantic",
            "Night",
            "Morning",
            "Unknown",
        ] {
            assert!(genres_for_mood(mood).len() <= 5, "mood {mood}");
        }
    }

    #[test]
    fn test_params_in_range() {
        for mood in ["Happy", "Night", "Unknown", "Melancholic"] {
            let params = params_for_mood(mood);
            assert!((0.0..=1.0).contains(&params.target_energy));
            assert!((0.0..=1.0).contains(&params.target_valence));
        }
    }

    // ── Session store ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_memory_store_playlists_round_trip() {
        let store = MemoryStore::new();
        assert!(store.saved_playlists().await.unwrap().is_empty());

        let first = SavedPlaylist {
            mood: "Happy".into(),
            name: "Happy Mood - 2026-08-06".into(),
            playlist_id: "abc123".into(),
            spotify_url: "https://open.spotify.com/playlist/abc123".into(),
            track_count: 20,
            saved_at: chrono::Utc::now(),
        };
        let second = SavedPlaylist {
            mood: "Night".into(),
            name: "Night Mood - 2026-08-06".into(),
            playlist_id: "def456".into(),
            spotify_url: "https://open.spotify.com/playlist/def456".into(),
            track_count: 12,
            saved_at: chrono::Utc::now(),
        };
        store.append_playlist(&first).await.unwrap();
        store.append_playlist(&second).await.unwrap();

        let listed = store.saved_playlists().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_memory_store_token_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load_token().await.unwrap().is_none());
        store.store_token("{\"access_token\":\"x\"}").await.unwrap();
        assert_eq!(
            store.load_token().await.unwrap().as_deref(),
            Some("{\"access_token\":\"x\"}")
        );
        store.clear_token().await.unwrap();
        assert!(store.load_token().await.unwrap().is_none());
    }

    // ── Playlist naming ──────────────────────────────────────────────────────

    #[test]
    fn test_playlist_name_carries_mood() {
        let name = crate::spotify::playlist::playlist_name("Happy");
        assert!(name.starts_with("Happy Mood - "));
    }
}
