//! Configuration types
//!
//! Board-agnostic configuration structures, deserialized from TOML by the
//! service.

pub mod types;

pub use types::*;
