//! pigpio notification protocol
//!
//! This crate decodes the level-change reports that the pigpio daemon
//! writes to a notification FIFO (`/dev/pigpio<handle>`) and turns them
//! into debounced button presses.
//!
//! # Protocol Overview
//!
//! The button listener reads the FIFO in fixed 24-byte frames (two pigpio
//! reports). Only the first report's level word is inspected:
//! ```text
//! ┌──────┬───────┬──────┬───────────┬────────────────────┐
//! │ SEQ  │ FLAGS │ TICK │ LEVEL     │ SECOND REPORT      │
//! │ 2B   │ 2B    │ 4B   │ 4B        │ 12B (ignored)      │
//! └──────┴───────┴──────┴───────────┴────────────────────┘
//! ```
//!
//! All multi-byte fields are little-endian. Bit `n` of the level word is
//! the level of GPIO `n`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod debounce;
pub mod decoder;
pub mod events;
pub mod frame;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use decoder::ButtonDecoder;
pub use events::PressEvent;
pub use frame::{FrameError, NotificationFrame, FRAME_SIZE, MAX_PIN};
