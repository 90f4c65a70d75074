//! Dial actuator
//!
//! Owns the three PWM outputs and writes clamped duty values to them.
//! Any `embedded-hal` PWM channel works; on the Pi each channel wraps the
//! `pigs` utility.

use embedded_hal::pwm::SetDutyCycle;

use super::mapping::{clamp_duty, hour_raw, sixtieth_raw, weather_raw, MAX_DUTY};
use super::{Dial, Reading};

/// A dial write failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorError<E> {
    /// What was being shown
    pub reading: Reading,
    /// Which dial rejected the write
    pub dial: Dial,
    /// Error from the PWM output
    pub error: E,
}

impl<E: core::fmt::Debug> core::fmt::Display for ActuatorError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "error setting {} on {:?} dial: {:?}",
            self.reading.name(),
            self.dial,
            self.error
        )
    }
}

/// Three PWM dials
pub struct DialActuator<P> {
    dials: [P; 3],
}

impl<P: SetDutyCycle> DialActuator<P> {
    /// Create an actuator from the primary, secondary and tertiary outputs
    pub fn new(primary: P, secondary: P, tertiary: P) -> Self {
        Self {
            dials: [primary, secondary, tertiary],
        }
    }

    /// Write a raw value to one dial, clamped to 0-255
    ///
    /// Returns the duty actually written.
    pub fn write(&mut self, dial: Dial, raw: i32) -> Result<u8, P::Error> {
        let duty = clamp_duty(raw);
        self.dials[dial.index()].set_duty_cycle_fraction(u16::from(duty), u16::from(MAX_DUTY))?;
        Ok(duty)
    }

    /// Show a time of day; stops at the first failed write
    pub fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ActuatorError<P::Error>> {
        self.apply([
            (Reading::Hour, hour_raw(hour)),
            (Reading::Minute, sixtieth_raw(minute)),
            (Reading::Second, sixtieth_raw(second)),
        ])
    }

    /// Show weather conditions; stops at the first failed write
    pub fn set_weather(
        &mut self,
        temp_f: i32,
        humidity: i32,
        precipitation: i32,
    ) -> Result<(), ActuatorError<P::Error>> {
        self.apply([
            (Reading::Temperature, weather_raw(temp_f)),
            (Reading::Humidity, weather_raw(humidity)),
            (Reading::Precipitation, weather_raw(precipitation)),
        ])
    }

    fn apply(&mut self, readings: [(Reading, i32); 3]) -> Result<(), ActuatorError<P::Error>> {
        for ((reading, raw), dial) in readings.into_iter().zip(Dial::ALL) {
            self.write(dial, raw)
                .map_err(|error| ActuatorError { reading, dial, error })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::pwm::{ErrorKind, ErrorType};
    use proptest::prelude::*;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl embedded_hal::pwm::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Records `(pin, duty)` writes into a shared log
    struct RecordingChannel {
        pin: u8,
        fail: bool,
        log: Rc<RefCell<Vec<(u8, u16)>>>,
    }

    impl ErrorType for RecordingChannel {
        type Error = MockError;
    }

    impl SetDutyCycle for RecordingChannel {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push((self.pin, duty));
            Ok(())
        }
    }

    fn actuator(failing_pin: Option<u8>) -> (DialActuator<RecordingChannel>, Rc<RefCell<Vec<(u8, u16)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let channel = |pin| RecordingChannel {
            pin,
            fail: failing_pin == Some(pin),
            log: log.clone(),
        };
        let actuator = DialActuator::new(channel(17), channel(27), channel(22));
        (actuator, log)
    }

    #[test]
    fn test_set_time_end_of_day() {
        let (mut dials, log) = actuator(None);
        dials.set_time(23, 59, 0).unwrap();
        assert_eq!(*log.borrow(), [(17, 230), (27, 236), (22, 0)]);
    }

    #[test]
    fn test_set_time_midnight() {
        let (mut dials, log) = actuator(None);
        dials.set_time(0, 0, 0).unwrap();
        assert_eq!(*log.borrow(), [(17, 0), (27, 0), (22, 0)]);
    }

    #[test]
    fn test_set_weather_top_of_range() {
        let (mut dials, log) = actuator(None);
        dials.set_weather(40, 100, 100).unwrap();
        assert_eq!(*log.borrow(), [(17, 96), (27, 240), (22, 240)]);
    }

    #[test]
    fn test_set_weather_negative_clamps_to_zero() {
        let (mut dials, log) = actuator(None);
        dials.set_weather(-20, 0, 0).unwrap();
        assert_eq!(*log.borrow(), [(17, 0), (27, 0), (22, 0)]);
    }

    #[test]
    fn test_write_saturates() {
        let (mut dials, log) = actuator(None);
        assert_eq!(dials.write(Dial::Secondary, 1_000), Ok(255));
        assert_eq!(dials.write(Dial::Tertiary, -5), Ok(0));
        assert_eq!(*log.borrow(), [(27, 255), (22, 0)]);
    }

    #[test]
    fn test_failure_short_circuits() {
        let (mut dials, log) = actuator(Some(27));
        let err = dials.set_time(12, 30, 15).unwrap_err();

        assert_eq!(err.reading, Reading::Minute);
        assert_eq!(err.dial, Dial::Secondary);
        // Hour was written, second was never attempted
        assert_eq!(*log.borrow(), [(17, 120)]);
    }

    #[test]
    fn test_weather_failure_names_reading() {
        let (mut dials, _log) = actuator(Some(17));
        let err = dials.set_weather(70, 50, 10).unwrap_err();
        assert_eq!(err.reading, Reading::Temperature);
        assert_eq!(err.dial, Dial::Primary);
    }

    proptest! {
        #[test]
        fn prop_weather_never_fails_and_stays_in_range(
            temp in any::<i32>(),
            humidity in any::<i32>(),
            precipitation in any::<i32>(),
        ) {
            let (mut dials, log) = actuator(None);
            prop_assert!(dials.set_weather(temp, humidity, precipitation).is_ok());
            for &(_, duty) in log.borrow().iter() {
                prop_assert!(duty <= u16::from(MAX_DUTY));
            }
        }
    }
}
