use std::time::Duration;

use serde::Deserialize;

use super::SignalError;

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Current conditions for a city, as read off the provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub condition: String,
    pub temperature_c: f64,
}

// OpenWeatherMap current-weather response, reduced to the fields we read.
// Anything that doesn't match this shape is a schema error, not a panic.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Vec<WeatherCondition>,
    main: MainReading,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct MainReading {
    temp: f64,
}

impl WeatherResponse {
    fn into_observation(self) -> Result<WeatherObservation, SignalError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| SignalError::Schema("empty weather array".into()))?
            .main;
        Ok(WeatherObservation {
            condition,
            temperature_c: self.main.temp,
        })
    }
}

pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build the weather HTTP client");
        WeatherClient {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches current conditions for `city`, metric units. One request,
    /// no retries; the client timeout bounds the call.
    pub async fn observe(&self, city: &str) -> Result<WeatherObservation, SignalError> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| SignalError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::Fetch(format!(
                "weather provider returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SignalError::Fetch(e.to_string()))?;
        parse_response(&body)
    }

    /// Fetch plus derivation in one step, the shape the engine consumes.
    pub async fn moods_for_city(&self, city: &str) -> Result<Vec<String>, SignalError> {
        let observation = self.observe(city).await?;
        tracing::debug!(
            condition = %observation.condition,
            temp = observation.temperature_c,
            "weather observation for {city}"
        );
        Ok(moods_for_observation(&observation)
            .iter()
            .map(|m| m.to_string())
            .collect())
    }
}

/// Derives mood labels from an observation. Temperature extremes override
/// the condition table.
pub fn moods_for_observation(observation: &WeatherObservation) -> &'static [&'static str] {
    if observation.temperature_c > 25.0 {
        return &["Summer", "Energetic", "Party"];
    }
    if observation.temperature_c < 10.0 {
        return &["Cozy", "Calm", "Introspective"];
    }
    match observation.condition.as_str() {
        "Clear" => &["Happy", "Energetic", "Peaceful"],
        "Rain" => &["Melancholic", "Relaxed", "Contemplative"],
        "Clouds" => &["Calm", "Focused", "Mellow"],
        "Snow" => &["Magical", "Peaceful", "Romantic"],
        "Thunderstorm" => &["Intense", "Dramatic", "Energetic"],
        _ => &["Neutral"],
    }
}

/// Decodes a raw provider body into an observation.
pub(crate) fn parse_response(body: &str) -> Result<WeatherObservation, SignalError> {
    let response: WeatherResponse =
        serde_json::from_str(body).map_err(|e| SignalError::Schema(e.to_string()))?;
    response.into_observation()
}
