//! Display mode state machine
//!
//! The dials show one mode at a time. Each button press advances to the
//! next mode in a fixed cycle: Clock → Weather → Test → Clock.

mod machine;

pub use machine::Mode;
