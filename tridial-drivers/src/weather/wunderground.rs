//! Weather Underground client
//!
//! Uses the hourly forecast endpoint and treats the first hourly entry as
//! the current conditions. The API encodes numbers as JSON strings and
//! answers HTTP 200 even for a bad key, reporting the problem in
//! `response.error` instead.

use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use tridial_core::traits::{Conditions, Location, WeatherError, WeatherSource};

const BASE_URL: &str = "http://api.wunderground.com/api";

/// Client for the Weather Underground API
pub struct WuClient {
    api_key: String,
    base_url: String,
    agent: ureq::Agent,
}

impl WuClient {
    /// Create a client using `api_key`
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            agent: ureq::Agent::new(),
        }
    }

    /// Hourly forecast for `location`, earliest entry first
    pub fn hourly(&self, location: &Location) -> Result<Vec<Conditions>, WeatherError> {
        debug!(
            "fetching hourly forecast for {}/{}",
            location.region.as_str(),
            location.city.as_str()
        );

        let response = self.agent.get(&self.url(location)).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => WeatherError::Status(code),
            ureq::Error::Transport(t) => {
                warn!("weather request failed: {}", t);
                WeatherError::Transport
            }
        })?;

        let body = response.into_string().map_err(|e| {
            warn!("could not read weather response: {}", e);
            WeatherError::Transport
        })?;

        parse_hourly(&body)
    }

    fn url(&self, location: &Location) -> String {
        format!(
            "{}/{}/hourly/q/{}/{}.json",
            self.base_url,
            self.api_key,
            location.region.as_str(),
            location.city.as_str()
        )
    }
}

impl WeatherSource for WuClient {
    fn current(&mut self, location: &Location) -> Result<Conditions, WeatherError> {
        first_entry(self.hourly(location)?)
    }
}

/// Current conditions are the earliest hourly entry
fn first_entry(hourly: Vec<Conditions>) -> Result<Conditions, WeatherError> {
    hourly.into_iter().next().ok_or(WeatherError::EmptyForecast)
}

#[derive(Deserialize)]
struct HourlyResponse {
    #[serde(default)]
    response: Option<ResponseMeta>,
    #[serde(default)]
    hourly_forecast: Vec<HourlyEntry>,
}

#[derive(Deserialize)]
struct ResponseMeta {
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Deserialize)]
struct ProviderError {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct HourlyEntry {
    temp: Temperature,
    #[serde(deserialize_with = "numeric")]
    humidity: i32,
    #[serde(deserialize_with = "numeric")]
    pop: i32,
}

#[derive(Deserialize)]
struct Temperature {
    #[serde(deserialize_with = "numeric")]
    english: i32,
    #[serde(deserialize_with = "numeric")]
    metric: i32,
}

/// Accept `"42"` as well as `42`
fn numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Decode an hourly forecast response body
pub fn parse_hourly(body: &str) -> Result<Vec<Conditions>, WeatherError> {
    let parsed: HourlyResponse = serde_json::from_str(body).map_err(|e| {
        warn!("could not decode weather response: {}", e);
        WeatherError::Decode
    })?;

    if let Some(error) = parsed.response.and_then(|meta| meta.error) {
        warn!("weather provider error {}: {}", error.kind, error.description);
        return Err(WeatherError::Rejected);
    }

    Ok(parsed
        .hourly_forecast
        .into_iter()
        .map(|entry| Conditions {
            temp_f: entry.temp.english,
            temp_c: entry.temp.metric,
            humidity: entry.humidity,
            precipitation: entry.pop,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURLY: &str = r#"{
        "response": {
            "version": "0.1",
            "termsofService": "http://www.wunderground.com/weather/api/d/terms.html",
            "features": { "hourly": 1 }
        },
        "hourly_forecast": [
            {
                "FCTTIME": { "hour": "14", "civil": "2:00 PM" },
                "temp": { "english": "68", "metric": "20" },
                "condition": "Clear",
                "humidity": "45",
                "pop": "10"
            },
            {
                "FCTTIME": { "hour": "15", "civil": "3:00 PM" },
                "temp": { "english": "-4", "metric": "-20" },
                "humidity": "90",
                "pop": "80"
            }
        ]
    }"#;

    fn location() -> Location {
        Location {
            region: heapless::String::try_from("NJ").unwrap(),
            city: heapless::String::try_from("Hoboken").unwrap(),
        }
    }

    #[test]
    fn test_parse_hourly() {
        let hourly = parse_hourly(HOURLY).unwrap();
        assert_eq!(hourly.len(), 2);
        assert_eq!(
            hourly[0],
            Conditions {
                temp_f: 68,
                temp_c: 20,
                humidity: 45,
                precipitation: 10,
            }
        );
        assert_eq!(hourly[1].temp_f, -4);
        assert_eq!(hourly[1].precipitation, 80);
    }

    #[test]
    fn test_plain_numbers_accepted() {
        let body = r#"{"hourly_forecast":[{"temp":{"english":50,"metric":10},"humidity":30,"pop":0}]}"#;
        let hourly = parse_hourly(body).unwrap();
        assert_eq!(hourly[0].temp_f, 50);
        assert_eq!(hourly[0].humidity, 30);
    }

    #[test]
    fn test_provider_error() {
        let body = r#"{"response":{"error":{"type":"keynotfound","description":"this key does not exist"}}}"#;
        assert_eq!(parse_hourly(body), Err(WeatherError::Rejected));
    }

    #[test]
    fn test_missing_forecast_is_empty() {
        let body = r#"{"response":{"version":"0.1"}}"#;
        assert_eq!(parse_hourly(body), Ok(Vec::new()));
    }

    #[test]
    fn test_current_is_first_entry() {
        let current = first_entry(parse_hourly(HOURLY).unwrap()).unwrap();
        assert_eq!(current.temp_f, 68);
        assert_eq!(current.humidity, 45);
    }

    #[test]
    fn test_empty_forecast_rejected() {
        let body = r#"{"response":{"version":"0.1"},"hourly_forecast":[]}"#;
        let hourly = parse_hourly(body).unwrap();
        assert_eq!(first_entry(hourly), Err(WeatherError::EmptyForecast));
    }

    #[test]
    fn test_malformed_number() {
        let body = r#"{"hourly_forecast":[{"temp":{"english":"warm","metric":"20"},"humidity":"45","pop":"10"}]}"#;
        assert_eq!(parse_hourly(body), Err(WeatherError::Decode));
    }

    #[test]
    fn test_not_json() {
        assert_eq!(parse_hourly("<html>"), Err(WeatherError::Decode));
    }

    #[test]
    fn test_url() {
        let client = WuClient::new("abc123");
        assert_eq!(
            client.url(&location()),
            "http://api.wunderground.com/api/abc123/hourly/q/NJ/Hoboken.json"
        );
    }
}
