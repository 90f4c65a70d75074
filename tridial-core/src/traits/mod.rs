//! Collaborator traits
//!
//! These traits define the interface between the application logic
//! and concrete providers.

pub mod weather;

pub use weather::{Conditions, Location, WeatherError, WeatherSource, MAX_PLACE_LEN};
