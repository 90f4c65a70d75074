//! Configuration loading
//!
//! Uses the TOML file named by `TRIDIAL_CONFIG` if set, otherwise the
//! embedded tridial.toml. Either source is validated before use.

use core::fmt;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tridial_core::config::{ClockConfig, ConfigError};

/// Environment variable naming an override config file
pub const CONFIG_ENV: &str = "TRIDIAL_CONFIG";

/// Embedded default configuration (validated by build.rs)
const EMBEDDED_CONFIG: &str = include_str!("../../tridial.toml");

/// Configuration loading errors
#[derive(Debug)]
pub enum LoadError {
    /// Override file could not be read
    Read { path: PathBuf, source: io::Error },
    /// TOML was malformed or did not match the config layout
    Parse(toml::de::Error),
    /// Values failed validation
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            LoadError::Parse(e) => write!(f, "invalid TOML: {}", e),
            LoadError::Invalid(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Load the active configuration
pub fn load() -> Result<ClockConfig, LoadError> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => load_file(Path::new(&path)),
        None => parse(EMBEDDED_CONFIG),
    }
}

/// Load and validate a config file
fn load_file(path: &Path) -> Result<ClockConfig, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parse and validate TOML text
pub fn parse(text: &str) -> Result<ClockConfig, LoadError> {
    let config: ClockConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Log a summary of the loaded configuration
pub fn log_summary(config: &ClockConfig) {
    match env::var_os(CONFIG_ENV) {
        Some(path) => info!("Configuration loaded from {}", Path::new(&path).display()),
        None => info!("Using embedded configuration"),
    }
    debug!("  button on GPIO {}, {} ms debounce", config.button.pin, config.button.debounce_ms);
    debug!(
        "  dials on GPIO {}/{}/{}",
        config.dials.primary, config.dials.secondary, config.dials.tertiary
    );
    debug!(
        "  weather for {}/{} every {} s",
        config.weather.location.region.as_str(),
        config.weather.location.city.as_str(),
        config.weather.refresh_secs
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [button]
        pin = 4
        debounce_ms = 50

        [dials]
        primary = 12
        secondary = 13
        tertiary = 18

        [weather]
        refresh_secs = 60
        api_key_env = "WEATHER_KEY"

        [weather.location]
        region = "CA"
        city = "San_Francisco"
    "#;

    #[test]
    fn test_embedded_matches_defaults() {
        assert_eq!(parse(EMBEDDED_CONFIG).unwrap(), ClockConfig::default());
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.button.pin, 4);
        assert_eq!(config.dials.as_array(), [12, 13, 18]);
        assert_eq!(config.weather.api_key_env.as_str(), "WEATHER_KEY");
        assert_eq!(config.clock.refresh_ms, 1000);
        assert_eq!(config.test_pattern.duty, 240);
        assert_eq!(config.pigpio.program.as_str(), "pigs");
        assert_eq!(config.logging, Default::default());
    }

    #[test]
    fn test_log_file_can_be_disabled() {
        let text = format!("{}\n[logging]\n", MINIMAL);
        assert_eq!(parse(&text).unwrap().logging.file, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let text = MINIMAL.replace("pin = 4", "pin = 40");
        assert!(matches!(
            parse(&text),
            Err(LoadError::Invalid(ConfigError::ButtonPinOutOfRange(40)))
        ));
    }

    #[test]
    fn test_missing_section_rejected() {
        let text = MINIMAL.replace("[dials]", "[dial]");
        assert!(matches!(parse(&text), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_file(Path::new("/nonexistent/tridial.toml"));
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }
}
