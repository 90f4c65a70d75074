//! Dial output
//!
//! Three servo dials are driven by PWM. The same physical dials show
//! different readings depending on the mode:
//!
//! | dial      | clock  | weather       |
//! |-----------|--------|---------------|
//! | primary   | hour   | temperature   |
//! | secondary | minute | humidity      |
//! | tertiary  | second | precipitation |

pub mod actuator;
pub mod mapping;

pub use actuator::{ActuatorError, DialActuator};
pub use mapping::{clamp_duty, MAX_DUTY, TEST_PATTERN_DUTY};

/// Logical dial position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dial {
    /// Leftmost dial
    Primary,
    /// Middle dial
    Secondary,
    /// Rightmost dial
    Tertiary,
}

impl Dial {
    /// All dials in write order
    pub const ALL: [Dial; 3] = [Dial::Primary, Dial::Secondary, Dial::Tertiary];

    /// Index into per-dial arrays
    pub const fn index(self) -> usize {
        match self {
            Dial::Primary => 0,
            Dial::Secondary => 1,
            Dial::Tertiary => 2,
        }
    }
}

/// Quantity being shown on a dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Hour,
    Minute,
    Second,
    Temperature,
    Humidity,
    Precipitation,
    TestPattern,
}

impl Reading {
    /// Lowercase name for error messages
    pub const fn name(self) -> &'static str {
        match self {
            Reading::Hour => "hour",
            Reading::Minute => "minute",
            Reading::Second => "second",
            Reading::Temperature => "temperature",
            Reading::Humidity => "humidity",
            Reading::Precipitation => "precipitation",
            Reading::TestPattern => "test pattern",
        }
    }
}
