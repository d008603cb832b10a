use chrono::{Local, Timelike};
use thiserror::Error;
use tracing::debug;

pub mod params;
pub mod sentiment;
pub mod timeofday;
pub mod weather;

pub use params::{params_for_mood, CatalogParams};
use weather::WeatherClient;

/// Mood labels form an open vocabulary; equality is case-sensitive exact
/// string match with no normalization.
pub type MoodLabel = String;

/// Upper bound on the combined mood set.
pub const MAX_MOODS: usize = 5;

const NEUTRAL: &str = "Neutral";

/// Why a single signal source produced nothing usable. Each source
/// resolves its own failure to ["Neutral"] inside the engine; these
/// never escape an inference call.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("text has no analyzable content")]
    Unanalyzable,
    #[error("weather fetch failed: {0}")]
    Fetch(String),
    #[error("weather response did not match the expected schema: {0}")]
    Schema(String),
}

/// Combines free-text sentiment, live weather and time of day into a
/// deduplicated, size-bounded mood list. Stateless across calls; the
/// weather client is configured once at startup.
pub struct MoodEngine {
    weather: Option<WeatherClient>,
}

impl MoodEngine {
    pub fn new(weather: Option<WeatherClient>) -> Self {
        MoodEngine { weather }
    }

    pub fn weather_enabled(&self) -> bool {
        self.weather.is_some()
    }

    /// Infers moods from whatever signals are present, reading the local
    /// clock for the time signal.
    pub async fn infer_moods(&self, text: Option<&str>, city: Option<&str>) -> Vec<MoodLabel> {
        self.infer_moods_at(text, city, Local::now().hour()).await
    }

    /// Same as `infer_moods` with the hour supplied by the caller.
    ///
    /// Union order is a fixed priority: text labels first, then weather,
    /// then time, first-seen-wins on duplicates, truncated to MAX_MOODS.
    /// The first element is the primary mood. A failed source contributes
    /// ["Neutral"] instead of failing the call.
    pub async fn infer_moods_at(
        &self,
        text: Option<&str>,
        city: Option<&str>,
        hour: u32,
    ) -> Vec<MoodLabel> {
        let mut moods: Vec<MoodLabel> = Vec::new();

        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            match sentiment::moods_for_text(text) {
                Ok(labels) => extend_unique(&mut moods, labels.iter().map(|l| l.to_string())),
                Err(e) => {
                    debug!("sentiment signal unavailable: {e}");
                    extend_unique(&mut moods, [NEUTRAL.to_string()]);
                }
            }
        }

        if let (Some(city), Some(weather)) = (city.filter(|c| !c.trim().is_empty()), &self.weather)
        {
            match weather.moods_for_city(city).await {
                Ok(labels) => extend_unique(&mut moods, labels),
                Err(e) => {
                    debug!("weather signal unavailable: {e}");
                    extend_unique(&mut moods, [NEUTRAL.to_string()]);
                }
            }
        }

        // The time signal is unconditional, so the set is never empty.
        extend_unique(
            &mut moods,
            timeofday::moods_for_hour(hour).iter().map(|l| l.to_string()),
        );

        moods.truncate(MAX_MOODS);
        moods
    }
}

fn extend_unique(moods: &mut Vec<MoodLabel>, labels: impl IntoIterator<Item = MoodLabel>) {
    for label in labels {
        if !moods.contains(&label) {
            moods.push(label);
        }
    }
}
