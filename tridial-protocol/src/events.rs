//! Button events produced by the notification decoder

/// One debounced press of the mode button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressEvent;

impl PressEvent {
    /// Number of modes to advance for this press
    ///
    /// Every press advances by exactly one mode. There is no long-press
    /// or multi-step input.
    pub const fn delta(&self) -> u8 {
        1
    }
}
