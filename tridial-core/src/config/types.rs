//! Service configuration types

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dial::TEST_PATTERN_DUTY;
use crate::traits::Location;

/// Maximum length of a path or variable name in the config
pub const MAX_PATH_LEN: usize = 64;

/// Highest GPIO a notification level mask can report
pub const MAX_BUTTON_PIN: u8 = 31;

/// Highest Broadcom GPIO number on the Pi header
pub const MAX_GPIO: u8 = 53;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Button GPIO is outside the notification level mask
    ButtonPinOutOfRange(u8),
    /// Dial GPIO does not exist
    DialPinOutOfRange(u8),
    /// The same GPIO is assigned to two dials
    DuplicateDialPin(u8),
    /// A dial shares its GPIO with the button
    DialOnButtonPin(u8),
    /// A refresh period is zero
    ZeroPeriod(&'static str),
    /// Weather location has an empty field
    EmptyLocation,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ButtonPinOutOfRange(pin) => {
                write!(f, "button pin {} is above {}", pin, MAX_BUTTON_PIN)
            }
            ConfigError::DialPinOutOfRange(pin) => {
                write!(f, "dial pin {} is above {}", pin, MAX_GPIO)
            }
            ConfigError::DuplicateDialPin(pin) => write!(f, "pin {} drives two dials", pin),
            ConfigError::DialOnButtonPin(pin) => {
                write!(f, "pin {} is both a dial and the button", pin)
            }
            ConfigError::ZeroPeriod(name) => write!(f, "{} must be greater than zero", name),
            ConfigError::EmptyLocation => f.write_str("weather location needs a region and city"),
        }
    }
}

/// Mode button settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Broadcom GPIO of the active-low button
    pub pin: u8,
    /// Minimum time between accepted presses
    pub debounce_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            pin: 26,
            debounce_ms: 100,
        }
    }
}

/// Dial assignment: logical dial → Broadcom GPIO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialPins {
    /// Hour / temperature
    pub primary: u8,
    /// Minute / humidity
    pub secondary: u8,
    /// Second / precipitation
    pub tertiary: u8,
}

impl DialPins {
    /// Pins in dial order
    pub fn as_array(&self) -> [u8; 3] {
        [self.primary, self.secondary, self.tertiary]
    }
}

impl Default for DialPins {
    fn default() -> Self {
        Self {
            primary: 17,
            secondary: 27,
            tertiary: 22,
        }
    }
}

/// Clock mode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockModeConfig {
    /// Time between dial refreshes
    pub refresh_ms: u64,
}

impl Default for ClockModeConfig {
    fn default() -> Self {
        Self { refresh_ms: 1000 }
    }
}

/// Weather mode settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherModeConfig {
    /// Time between fetches
    pub refresh_secs: u64,
    /// Environment variable holding the provider API key
    pub api_key_env: String<MAX_PATH_LEN>,
    /// Where to report the weather for
    pub location: Location,
}

impl Default for WeatherModeConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 10,
            api_key_env: str_field("WU_API_KEY"),
            location: Location {
                region: str_field("NJ"),
                city: str_field("Hoboken"),
            },
        }
    }
}

/// Test mode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestModeConfig {
    /// Duty written to every dial
    pub duty: u8,
}

impl Default for TestModeConfig {
    fn default() -> Self {
        Self {
            duty: TEST_PATTERN_DUTY,
        }
    }
}

/// pigpio access settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PigpioConfig {
    /// `pigs` executable, looked up on `PATH` when not absolute
    pub program: String<MAX_PATH_LEN>,
}

impl Default for PigpioConfig {
    fn default() -> Self {
        Self {
            program: str_field("pigs"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoggingConfig {
    /// File that receives a copy of the log, appended to
    #[cfg_attr(feature = "serde", serde(default))]
    pub file: Option<String<MAX_PATH_LEN>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(str_field("weather.log")),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    pub button: ButtonConfig,
    pub dials: DialPins,
    #[cfg_attr(feature = "serde", serde(default))]
    pub clock: ClockModeConfig,
    pub weather: WeatherModeConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub test_pattern: TestModeConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pigpio: PigpioConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logging: LoggingConfig,
}

impl ClockConfig {
    /// Check pin assignments and periods
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.button.pin > MAX_BUTTON_PIN {
            return Err(ConfigError::ButtonPinOutOfRange(self.button.pin));
        }

        let pins = self.dials.as_array();
        for (i, &pin) in pins.iter().enumerate() {
            if pin > MAX_GPIO {
                return Err(ConfigError::DialPinOutOfRange(pin));
            }
            if pin == self.button.pin {
                return Err(ConfigError::DialOnButtonPin(pin));
            }
            if pins[..i].contains(&pin) {
                return Err(ConfigError::DuplicateDialPin(pin));
            }
        }

        if self.clock.refresh_ms == 0 {
            return Err(ConfigError::ZeroPeriod("clock.refresh_ms"));
        }
        if self.weather.refresh_secs == 0 {
            return Err(ConfigError::ZeroPeriod("weather.refresh_secs"));
        }

        let location = &self.weather.location;
        if location.region.is_empty() || location.city.is_empty() {
            return Err(ConfigError::EmptyLocation);
        }

        Ok(())
    }
}

/// Build a bounded string from a literal that is known to fit
fn str_field<const N: usize>(value: &str) -> String<N> {
    let mut s = String::new();
    let _ = s.push_str(value);
    s
}
