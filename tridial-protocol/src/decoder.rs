//! Frame-to-press decoding
//!
//! Combines frame decoding, pin polarity and debouncing into a single
//! step so the whole button contract can be tested without a FIFO.

use crate::debounce::Debouncer;
use crate::events::PressEvent;
use crate::frame::{FrameError, NotificationFrame, MAX_PIN};

/// Turns raw notification frames into debounced presses for one pin
#[derive(Debug, Clone)]
pub struct ButtonDecoder {
    pin: u8,
    debouncer: Debouncer,
}

impl ButtonDecoder {
    /// Create a decoder for `pin`
    pub fn new(pin: u8, debouncer: Debouncer) -> Result<Self, FrameError> {
        if pin > MAX_PIN {
            return Err(FrameError::InvalidPin(pin));
        }
        Ok(Self { pin, debouncer })
    }

    /// Observed GPIO
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Debounce window in milliseconds
    pub fn debounce_ms(&self) -> u64 {
        self.debouncer.window_ms()
    }

    /// Bitmask to arm on the notification handle
    pub fn pin_mask(&self) -> u32 {
        1u32 << self.pin
    }

    /// Process one frame read at `now_ms`
    ///
    /// Returns `Ok(Some(_))` for an accepted press, `Ok(None)` when the
    /// frame shows the button released or falls inside the debounce
    /// window, and `Err` for a frame that cannot be decoded.
    pub fn process(&mut self, bytes: &[u8], now_ms: u64) -> Result<Option<PressEvent>, FrameError> {
        let frame = NotificationFrame::decode(bytes)?;

        if frame.is_pressed(self.pin)? && self.debouncer.accept(now_ms) {
            Ok(Some(PressEvent))
        } else {
            Ok(None)
        }
    }
}
