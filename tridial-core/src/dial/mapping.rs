//! Mapping from domain values to PWM duty
//!
//! Dial scale is 0-240 over the nominal input range, with the full duty
//! range 0-255 available for saturation:
//! - hour 0-23 → ×10
//! - minute, second 0-59 → ×4
//! - temperature -20-40 °F, humidity and precipitation 0-100 → ×2.4

/// Highest duty accepted by the PWM output
pub const MAX_DUTY: u8 = 255;

/// Duty written to every dial in test mode
pub const TEST_PATTERN_DUTY: u8 = 240;

/// Clamp a raw value to the valid duty range
pub fn clamp_duty(raw: i32) -> u8 {
    raw.clamp(0, MAX_DUTY as i32) as u8
}

/// Raw dial value for an hour (0-23)
pub fn hour_raw(hour: u8) -> i32 {
    i32::from(hour) * 10
}

/// Raw dial value for a minute or second (0-59)
pub fn sixtieth_raw(value: u8) -> i32 {
    i32::from(value) * 4
}

/// Raw dial value for a weather quantity: `round(value * 2.4)`
///
/// Computed as `round(value * 12 / 5)` in integers. The fractional part is
/// always a multiple of 1/5, so there are no ties to break.
pub fn weather_raw(value: i32) -> i32 {
    value.saturating_mul(12).saturating_add(2).div_euclid(5)
}
