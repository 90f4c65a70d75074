//! PWM dial output through `pigs p`

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use log::{debug, warn};

use super::{Pigs, PigsError};

/// Full-scale duty for `pigs p` with the daemon's default range
pub const PIGS_MAX_DUTY: u16 = 255;

impl embedded_hal::pwm::Error for PigsError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One PWM GPIO driven by `pigs p <gpio> <duty>`
#[derive(Debug, Clone)]
pub struct PigsChannel {
    pigs: Pigs,
    pin: u8,
}

impl PigsChannel {
    pub fn new(pigs: Pigs, pin: u8) -> Self {
        Self { pigs, pin }
    }

    /// Broadcom GPIO number
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl ErrorType for PigsChannel {
    type Error = PigsError;
}

impl SetDutyCycle for PigsChannel {
    fn max_duty_cycle(&self) -> u16 {
        PIGS_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PigsError> {
        let duty = duty.min(PIGS_MAX_DUTY);
        debug!("writing value: {}, on pin {}", duty, self.pin);

        let output = self
            .pigs
            .run(["p".to_string(), self.pin.to_string(), duty.to_string()])?;

        if !output.stderr.is_empty() {
            warn!(
                "pigs p {}: {}",
                self.pin,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_write() {
        // `true` accepts any arguments and exits 0
        let mut channel = Pigs::new("true").pwm_channel(17);
        assert_eq!(channel.set_duty_cycle(240), Ok(()));
    }

    #[test]
    fn test_failed_write_reports_status() {
        let mut channel = Pigs::new("false").pwm_channel(17);
        match channel.set_duty_cycle(240) {
            Err(PigsError::Status { code, .. }) => assert_eq!(code, Some(1)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_program() {
        let mut channel = Pigs::new("/nonexistent/pigs").pwm_channel(17);
        assert_eq!(
            channel.set_duty_cycle(0),
            Err(PigsError::Spawn(std::io::ErrorKind::NotFound))
        );
    }

    #[test]
    fn test_max_duty() {
        let channel = Pigs::new("true").pwm_channel(22);
        assert_eq!(channel.max_duty_cycle(), 255);
        assert_eq!(channel.pin(), 22);
    }
}
