//! Notification frame decoding.
//!
//! Frame format (first pigpio report, the rest of the frame is ignored):
//! - SEQ (2 bytes): report sequence number
//! - FLAGS (2 bytes): pigpio report flags (watchdog, tick, event)
//! - TICK (4 bytes): microsecond tick of the level change
//! - LEVEL (4 bytes): bitmask of GPIO 0-31 levels

/// Size of one frame read from the notification stream
pub const FRAME_SIZE: usize = 24;

/// Offset of the 32-bit level bitmask inside a frame
pub const LEVEL_OFFSET: usize = 8;

/// Highest GPIO number covered by the level bitmask
pub const MAX_PIN: u8 = 31;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer than [`FRAME_SIZE`] bytes were available
    Short {
        /// Number of bytes actually read
        len: usize,
    },
    /// Pin is outside the level bitmask
    InvalidPin(u8),
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::Short { len } => {
                write!(f, "short frame: {} of {} bytes", len, FRAME_SIZE)
            }
            FrameError::InvalidPin(pin) => write!(f, "pin {} outside level mask", pin),
        }
    }
}

/// A decoded notification frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationFrame {
    seq: u16,
    flags: u16,
    tick: u32,
    level: u32,
}

impl NotificationFrame {
    /// Decode a frame from raw stream bytes
    ///
    /// Only the first [`FRAME_SIZE`] bytes are considered; extra bytes are
    /// ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < FRAME_SIZE {
            return Err(FrameError::Short { len: bytes.len() });
        }

        Ok(Self {
            seq: u16::from_le_bytes([bytes[0], bytes[1]]),
            flags: u16::from_le_bytes([bytes[2], bytes[3]]),
            tick: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            level: u32::from_le_bytes([
                bytes[LEVEL_OFFSET],
                bytes[LEVEL_OFFSET + 1],
                bytes[LEVEL_OFFSET + 2],
                bytes[LEVEL_OFFSET + 3],
            ]),
        })
    }

    /// Report sequence number
    pub fn seq(&self) -> u16 {
        self.seq
    }

    /// pigpio report flags
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Microsecond tick at which the levels were sampled
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Raw 32-bit level bitmask
    pub fn level_mask(&self) -> u32 {
        self.level
    }

    /// Level of a single GPIO (`true` = high)
    ///
    /// This is bit `pin % 8` of byte `8 + pin / 8` of the frame.
    pub fn level(&self, pin: u8) -> Result<bool, FrameError> {
        if pin > MAX_PIN {
            return Err(FrameError::InvalidPin(pin));
        }
        Ok((self.level >> pin) & 1 == 1)
    }

    /// Whether an active-low button on `pin` is held down
    pub fn is_pressed(&self, pin: u8) -> Result<bool, FrameError> {
        self.level(pin).map(|high| !high)
    }
}
