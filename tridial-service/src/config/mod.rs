//! Configuration loading

mod loader;

pub use loader::{load, log_summary, LoadError};
