//! Weather providers

pub mod wunderground;

pub use wunderground::WuClient;
