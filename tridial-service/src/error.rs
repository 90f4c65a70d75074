//! Fatal errors
//!
//! Anything that leaves the dials in an unknown state stops the service.
//! Tasks never panic on these paths: they report a [`FatalError`] on
//! [`crate::channels::FATAL`] and `main` logs it and exits.

use core::fmt;
use std::io;

use tridial_core::dial::ActuatorError;
use tridial_core::traits::WeatherError;
use tridial_drivers::pigpio::{NotifierError, PigsError};

use crate::config::LoadError;

/// Errors that terminate the process
#[derive(Debug)]
pub enum FatalError {
    /// Configuration could not be loaded
    Config(LoadError),
    /// Button notifications could not be set up
    Notifier(NotifierError),
    /// Button listener thread could not be started
    ButtonThread(io::Error),
    /// A clock or weather dial write failed
    Actuator(ActuatorError<PigsError>),
    /// Current conditions could not be fetched
    Weather(WeatherError),
    /// Weather mode needs an API key in this environment variable
    MissingApiKey(String),
    /// Task pool for this task is exhausted
    Spawn(&'static str),
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::Config(e) => write!(f, "configuration error: {}", e),
            FatalError::Notifier(e) => write!(f, "could not initialize button listener: {}", e),
            FatalError::ButtonThread(e) => write!(f, "could not start button listener: {}", e),
            FatalError::Actuator(e) => write!(f, "{}", e),
            FatalError::Weather(e) => write!(f, "{}", e),
            FatalError::MissingApiKey(var) => write!(f, "{} must be set", var),
            FatalError::Spawn(task) => write!(f, "could not spawn {} task", task),
        }
    }
}

impl std::error::Error for FatalError {}

impl From<LoadError> for FatalError {
    fn from(e: LoadError) -> Self {
        FatalError::Config(e)
    }
}

impl From<NotifierError> for FatalError {
    fn from(e: NotifierError) -> Self {
        FatalError::Notifier(e)
    }
}

impl From<ActuatorError<PigsError>> for FatalError {
    fn from(e: ActuatorError<PigsError>) -> Self {
        FatalError::Actuator(e)
    }
}

impl From<WeatherError> for FatalError {
    fn from(e: WeatherError) -> Self {
        FatalError::Weather(e)
    }
}
