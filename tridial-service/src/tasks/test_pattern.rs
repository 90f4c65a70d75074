//! Test mode
//!
//! One-shot: parks every dial at the same duty and exits. Write failures
//! are logged only, so a broken dial does not stop the others.

use log::{error, info};
use tridial_core::dial::{ActuatorError, Dial, Reading};

use super::Dials;

#[embassy_executor::task(pool_size = 2)]
pub async fn test_pattern_task(mut dials: Dials, duty: u8) {
    show_test_pattern(&mut dials, duty);
}

/// Write `duty` to every dial, returning how many writes failed
pub fn show_test_pattern(dials: &mut Dials, duty: u8) -> usize {
    info!("starting test mode");
    let mut failures = 0;
    for dial in Dial::ALL {
        if let Err(error) = dials.write(dial, i32::from(duty)) {
            let reading = Reading::TestPattern;
            error!("{}", ActuatorError { reading, dial, error });
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::testing::dials;

    #[test]
    fn test_writes_every_dial() {
        assert_eq!(show_test_pattern(&mut dials("true"), 240), 0);
    }

    #[test]
    fn test_failures_do_not_stop_other_dials() {
        assert_eq!(show_test_pattern(&mut dials("false"), 240), 3);
    }
}
