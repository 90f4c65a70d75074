//! Board-agnostic core logic for the three-dial clock
//!
//! This crate contains all application logic that does not depend on
//! pigpio, the network or the async runtime:
//!
//! - Display mode state machine
//! - Dial value mapping and the dial actuator
//! - Weather source trait and condition types
//! - Configuration type definitions and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dial;
pub mod mode;
pub mod traits;
