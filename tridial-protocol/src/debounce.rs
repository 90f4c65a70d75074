//! Time-window debouncing
//!
//! A press is accepted only when more than the debounce window has passed
//! since the previously accepted press. Timestamps are milliseconds from
//! any monotonic origin chosen by the caller.

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Debounce state for a single button
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u64,
    last_accepted_ms: u64,
}

impl Debouncer {
    /// Create a debouncer whose window starts at `start_ms`
    ///
    /// Presses within the first window after start are rejected, which
    /// swallows the level report pigpio emits when the stream is armed.
    pub fn new(window_ms: u64, start_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted_ms: start_ms,
        }
    }

    /// Debounce window in milliseconds
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Offer a candidate press at `now_ms`
    ///
    /// Returns `true` and restarts the window if the press is accepted.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_accepted_ms) > self.window_ms {
            self.last_accepted_ms = now_ms;
            true
        } else {
            false
        }
    }
}
