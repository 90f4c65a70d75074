//! Hardware and provider implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tridial-core for a Raspberry Pi running the pigpio daemon:
//!
//! - PWM dial outputs driven through the `pigs` utility
//! - Button notifications read from the pigpio notification FIFO
//! - Current conditions from the Weather Underground API

#![deny(unsafe_code)]

pub mod pigpio;
pub mod weather;
