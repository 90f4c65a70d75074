//! Weather source trait and condition types

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a region or city name
pub const MAX_PLACE_LEN: usize = 32;

/// Where to report the weather for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// State or region code (e.g. "NJ")
    pub region: String<MAX_PLACE_LEN>,
    /// City name as the provider expects it (e.g. "Hoboken")
    pub city: String<MAX_PLACE_LEN>,
}

/// Current weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conditions {
    /// Temperature in °F
    pub temp_f: i32,
    /// Temperature in °C
    pub temp_c: i32,
    /// Relative humidity in percent
    pub humidity: i32,
    /// Probability of precipitation in percent
    pub precipitation: i32,
}

/// Errors from a weather source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherError {
    /// Request could not be sent or no response was received
    Transport,
    /// Provider answered with a non-success HTTP status
    Status(u16),
    /// Response body could not be decoded
    Decode,
    /// Provider answered but reported an error (e.g. bad API key)
    Rejected,
    /// Forecast contained no entries
    EmptyForecast,
}

impl core::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WeatherError::Transport => f.write_str("weather request failed"),
            WeatherError::Status(code) => write!(f, "weather provider returned HTTP {}", code),
            WeatherError::Decode => f.write_str("could not decode weather response"),
            WeatherError::Rejected => f.write_str("weather provider rejected the request"),
            WeatherError::EmptyForecast => {
                f.write_str("could not get current conditions, empty forecast")
            }
        }
    }
}

/// Trait for current-conditions providers
///
/// Implementations are blocking; callers must expect the call to take as
/// long as the provider's network round trip.
pub trait WeatherSource {
    /// Fetch the conditions right now at `location`
    fn current(&mut self, location: &Location) -> Result<Conditions, WeatherError>;
}
