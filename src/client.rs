//! Blocking HTTP client for the Open-Meteo forecast API.
//!
//! - Blocking client using `ureq` (no async).
//! - Single endpoint: `/v1/forecast` with `current_weather=true`.
//! - No authentication; Open-Meteo is a public API.
//! - One attempt per call with a bounded agent-wide timeout. Retrying is the
//!   caller's (scheduler's) business.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

#[derive(Debug)]
pub enum OpenMeteoError {
    Transport(String),
    Http { status: u16, message: String },
    Json(serde_json::Error),
    /// The response parsed but `current_weather.temperature` was absent.
    MissingTemperature,
}

impl core::fmt::Display for OpenMeteoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OpenMeteoError::Transport(s) => write!(f, "transport error: {}", s),
            OpenMeteoError::Http { status, message } => write!(f, "http {}: {}", status, message),
            OpenMeteoError::Json(e) => write!(f, "json error: {}", e),
            OpenMeteoError::MissingTemperature => {
                write!(f, "response is missing current_weather.temperature")
            }
        }
    }
}

impl std::error::Error for OpenMeteoError {}

impl From<serde_json::Error> for OpenMeteoError {
    fn from(value: serde_json::Error) -> Self {
        OpenMeteoError::Json(value)
    }
}

/// Body of a `/v1/forecast?current_weather=true` response, reduced to the
/// fields this application reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<i64>,
    #[serde(default)]
    pub time: Option<String>,
}

impl ForecastResponse {
    pub fn temperature_celsius(&self) -> Result<f64, OpenMeteoError> {
        self.current_weather
            .as_ref()
            .and_then(|cw| cw.temperature)
            .ok_or(OpenMeteoError::MissingTemperature)
    }
}

pub struct OpenMeteoClient {
    agent: ureq::Agent,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoClient {
    pub fn new(latitude: f64, longitude: f64, timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, latitude, longitude, timeout)
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(base_url: impl Into<String>, latitude: f64, longitude: f64, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        OpenMeteoClient {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            latitude,
            longitude,
        }
    }

    /// Fetch the full current-weather forecast body.
    pub fn get_forecast(&self) -> Result<ForecastResponse, OpenMeteoError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let req = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .query("latitude", &self.latitude.to_string())
            .query("longitude", &self.longitude.to_string())
            .query("current_weather", "true");

        match req.call() {
            Ok(res) => serde_json::from_reader(res.into_reader()).map_err(OpenMeteoError::Json),
            Err(ureq::Error::Transport(t)) => Err(OpenMeteoError::Transport(t.to_string())),
            Err(ureq::Error::Status(status, res)) => {
                let body = res.into_string().unwrap_or_else(|_| String::from("<no body>"));
                Err(OpenMeteoError::Http { status, message: body })
            }
        }
    }

    /// Fetch the current temperature, in celsius.
    pub fn current_temperature(&self) -> Result<f64, OpenMeteoError> {
        self.get_forecast()?.temperature_celsius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_temperature_from_current_weather() {
        let body = r#"{"current_weather": {"temperature": 21.5}}"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.temperature_celsius().unwrap(), 21.5);
    }

    #[test]
    fn tolerates_extra_fields() {
        let body = r#"{
            "latitude": 51.5,
            "longitude": 0.13,
            "generationtime_ms": 0.2,
            "current_weather": {
                "temperature": -3.25,
                "windspeed": 11.2,
                "weathercode": 71,
                "time": "2025-08-28T12:00"
            }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.temperature_celsius().unwrap(), -3.25);
    }

    #[test]
    fn missing_temperature_is_an_error() {
        let parsed: ForecastResponse = serde_json::from_str(r#"{"current_weather": {}}"#).unwrap();
        assert!(matches!(
            parsed.temperature_celsius(),
            Err(OpenMeteoError::MissingTemperature)
        ));

        let parsed: ForecastResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            parsed.temperature_celsius(),
            Err(OpenMeteoError::MissingTemperature)
        ));
    }
}
