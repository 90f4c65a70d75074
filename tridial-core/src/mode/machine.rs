//! Mode definition and transitions

/// Display modes, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Hour, minute and second on the three dials
    #[default]
    Clock,
    /// Temperature, humidity and precipitation chance
    Weather,
    /// Fixed diagnostic duty on every dial
    Test,
}

impl Mode {
    /// All modes in cycle order
    pub const ALL: [Mode; 3] = [Mode::Clock, Mode::Weather, Mode::Test];

    /// Number of modes in the cycle
    pub const COUNT: u8 = 3;

    /// Position in the cycle (0, 1 or 2)
    pub const fn ordinal(self) -> u8 {
        match self {
            Mode::Clock => 0,
            Mode::Weather => 1,
            Mode::Test => 2,
        }
    }

    /// Mode at a cycle position, wrapping modulo [`Mode::COUNT`]
    pub const fn from_ordinal(ordinal: u8) -> Self {
        match ordinal % Self::COUNT {
            0 => Mode::Clock,
            1 => Mode::Weather,
            _ => Mode::Test,
        }
    }

    /// Advance `delta` positions around the cycle
    pub const fn advance(self, delta: u8) -> Self {
        // Reduce first so the sum cannot overflow
        Self::from_ordinal(self.ordinal() + delta % Self::COUNT)
    }

    /// The mode one press away
    pub const fn next(self) -> Self {
        self.advance(1)
    }

    /// Whether a running task for this mode can be told to stop
    ///
    /// Clock and Weather run periodic loops that watch a cancellation
    /// token. Test writes its pattern once and exits, so it never
    /// registers a token and must never be waited on.
    pub const fn supports_cancellation(self) -> bool {
        match self {
            Mode::Clock | Mode::Weather => true,
            Mode::Test => false,
        }
    }

    /// Lowercase name for logs
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Clock => "clock",
            Mode::Weather => "weather",
            Mode::Test => "test",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
